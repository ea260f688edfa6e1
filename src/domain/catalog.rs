use std::collections::HashMap;

use super::CatalogItem;

/// 人気ランキングの既定件数
pub const DEFAULT_TOP_N: usize = 10;

/// Catalog集約 - タイトルをキーとした全資料の登録簿
///
/// 資料は登録順に保持する。同じタイトルを再登録すると、
/// 元の位置のまま後から登録した資料で置き換わる。
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 資料を登録する（同じタイトルは後勝ち）
    pub fn add_item(&mut self, item: CatalogItem) {
        match self.index.get(item.title()) {
            Some(&position) => self.items[position] = item,
            None => {
                self.index.insert(item.title().to_string(), self.items.len());
                self.items.push(item);
            }
        }
    }

    pub fn get_item(&self, title: &str) -> Option<&CatalogItem> {
        let position = *self.index.get(title)?;
        self.items.get(position)
    }

    pub fn get_item_mut(&mut self, title: &str) -> Option<&mut CatalogItem> {
        let position = *self.index.get(title)?;
        self.items.get_mut(position)
    }

    /// 登録順の全資料
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 人気度の降順で上位`n`件
    ///
    /// 同じ人気度の資料は登録順を保つ（安定ソート）。
    pub fn top_popular(&self, n: usize) -> Vec<&CatalogItem> {
        let mut ranked: Vec<&CatalogItem> = self.items.iter().collect();
        ranked.sort_by(|a, b| b.popularity().cmp(&a.popularity()));
        ranked.truncate(n);
        ranked
    }

    /// 貸出可能な資料（登録順）
    pub fn list_available(&self) -> Vec<&CatalogItem> {
        self.items.iter().filter(|item| item.is_available()).collect()
    }
}
