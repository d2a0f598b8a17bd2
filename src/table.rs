//! Table Module
//!
//! ワークシートから読み込んだ表と、複数の表の行方向の結合を提供するモジュール。

use std::collections::{HashMap, HashSet};

use crate::error::MergeError;
use crate::types::CellValue;

/// 列名付きの表
///
/// 1行目をヘッダーとして解釈した後のデータです。
/// すべての行は`columns`と同じ長さを持ちます。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// 列名と行から表を生成する
    ///
    /// 行の長さが列数と異なる場合は、空セルで埋めるか切り詰めます。
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// セルのグリッドから表を生成する
    ///
    /// 1行目をヘッダーとして扱い、残りをデータ行とします。
    /// グリッドが空の場合は列も行もない表になります。
    ///
    /// # ヘッダーの正規化
    ///
    /// - 空のヘッダーセルは`Unnamed: <列インデックス>`
    /// - 重複した列名は2つ目以降に`.1`, `.2`, ...を付与
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Self {
        Self::from_grid_at(grid, 0)
    }

    /// シート上の開始列を指定してグリッドから表を生成する
    ///
    /// `Unnamed: <n>`の`n`は`first_column`を起点としたシート上の列インデックスになります。
    /// 使用範囲がB列から始まるシートでは、B列の空ヘッダーが`Unnamed: 1`です。
    pub fn from_grid_at(grid: Vec<Vec<CellValue>>, first_column: usize) -> Self {
        let mut grid = grid.into_iter();
        let Some(header) = grid.next() else {
            return Self::default();
        };

        let columns = normalize_headers(&header, first_column);
        Self::new(columns, grid.collect())
    }

    /// 列名の一覧
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// データ行の一覧
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// データ行数（ヘッダーを除く）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 列も行もない表かどうか
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// 列名を指定してセルを取得する
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 複数の表を行方向に結合する
    ///
    /// 行の順序は入力の順序を保ちます。列は全入力の和集合で、
    /// 最初に現れた順に並びます。ある表に存在しない列のセルは`CellValue::Empty`になります。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 結合された表
    /// * `Err(MergeError::NoInputFiles)` - 入力が1つもない場合
    pub fn concat(tables: Vec<Table>) -> Result<Table, MergeError> {
        if tables.is_empty() {
            return Err(MergeError::NoInputFiles(
                "no tables to concatenate".to_string(),
            ));
        }

        // 1. 列の和集合（出現順）
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for table in &tables {
            for name in &table.columns {
                if !index.contains_key(name) {
                    index.insert(name.clone(), columns.len());
                    columns.push(name.clone());
                }
            }
        }

        // 2. 各表の行を和集合の列位置に配置
        let total_rows = tables.iter().map(Table::row_count).sum();
        let mut rows = Vec::with_capacity(total_rows);
        for table in tables {
            let positions: Vec<usize> = table.columns.iter().map(|c| index[c]).collect();
            for row in table.rows {
                let mut merged = vec![CellValue::Empty; columns.len()];
                for (value, &pos) in row.into_iter().zip(&positions) {
                    merged[pos] = value;
                }
                rows.push(merged);
            }
        }

        Ok(Table { columns, rows })
    }
}

/// ヘッダー行を列名に変換する
fn normalize_headers(header: &[CellValue], first_column: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(header.len());

    for (offset, cell) in header.iter().enumerate() {
        let base = cell
            .as_header_text()
            .unwrap_or_else(|| format!("Unnamed: {}", first_column + offset));

        let mut name = base.clone();
        if seen.contains(&name) {
            let count = counts.entry(base.clone()).or_insert(0);
            while seen.contains(&name) {
                *count += 1;
                name = format!("{}.{}", base, count);
            }
        }

        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}
