//! Workbook Reader
//!
//! 1つのワークブックから1シートを読み込み、`Table`に変換します。

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use tracing::debug;

use crate::api::SheetSelector;
use crate::error::MergeError;
use crate::security::SecurityConfig;
use crate::table::Table;
use crate::types::CellValue;

/// ワークブックリーダー
///
/// calamineのラッパーとして、シート選択とセル値の変換を提供します。
/// XLSXとXLSの両方を扱うため、`Sheets`（自動判定）を保持します。
pub(crate) struct WorkbookReader<RS: Read + Seek> {
    workbook: Sheets<RS>,
}

impl WorkbookReader<BufReader<File>> {
    /// ファイルパスからワークブックを開く
    ///
    /// 形式は拡張子で判定されます（`.xlsx` → XLSX, `.xls` → XLS）。
    /// ファイルサイズが上限を超える場合は、解析前にエラーを返します。
    pub fn open_path(path: &Path, security: &SecurityConfig) -> Result<Self, MergeError> {
        let size = std::fs::metadata(path)?.len();
        security.check_input_size(size)?;

        let workbook = open_workbook_auto(path)?;
        Ok(Self { workbook })
    }
}

impl WorkbookReader<Cursor<Vec<u8>>> {
    /// 任意のリーダーからワークブックを開く
    ///
    /// 内容をメモリに読み込み、形式はcalamineが内容から判定します。
    pub fn open_reader<R: Read>(mut reader: R, security: &SecurityConfig) -> Result<Self, MergeError> {
        // 上限+1バイトまで読めば超過を判定できる
        let mut buffer = Vec::new();
        let bytes_read = reader
            .by_ref()
            .take(security.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read as u64)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> WorkbookReader<RS> {
    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシート名を決定する
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(MergeError::Config)` - シートが存在しない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, MergeError> {
        let names = self.sheet_names();

        match selector {
            SheetSelector::First => names
                .into_iter()
                .next()
                .ok_or_else(|| MergeError::Config("Workbook contains no sheets".to_string())),

            SheetSelector::Index(index) => {
                let total = names.len();
                names.into_iter().nth(*index).ok_or_else(|| {
                    MergeError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index, total
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if names.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(MergeError::Config(format!("Sheet '{}' not found", name)))
                }
            }
        }
    }

    /// 選択されたシートを表として読み込む
    ///
    /// シートの使用範囲の1行目をヘッダーとして扱います。
    /// 空ヘッダーの列番号は使用範囲ではなくシート上の列位置で数えます。
    pub fn read_table(&mut self, selector: &SheetSelector) -> Result<Table, MergeError> {
        let sheet_name = self.select_sheet(selector)?;
        let range = self.workbook.worksheet_range(&sheet_name)?;

        let (height, width) = range.get_size();
        let first_column = range.start().map_or(0, |(_, col)| col as usize);
        debug!(sheet = %sheet_name, height, width, first_column, "read worksheet range");

        Ok(Table::from_grid_at(range_to_grid(&range), first_column))
    }
}

/// calamineの範囲をセル値のグリッドに変換
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect()
}

/// calamineのセル値を変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                dt.as_duration()
                    .map(CellValue::Duration)
                    .unwrap_or(CellValue::Number(dt.as_f64()))
            } else {
                dt.as_datetime()
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Number(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_convert_scalar_cells() {
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(
            convert_cell(&Data::String("x".to_string())),
            CellValue::String("x".to_string())
        );
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_convert_error_cell() {
        assert_eq!(
            convert_cell(&Data::Error(CellErrorType::Div0)),
            CellValue::Error("#DIV/0!".to_string())
        );
    }

    #[test]
    fn test_convert_iso_strings() {
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2025-01-01T10:00:00".to_string())),
            CellValue::String("2025-01-01T10:00:00".to_string())
        );
    }

    #[test]
    fn test_read_table_from_xls() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("legacy_ids.xls");
        let mut reader = WorkbookReader::open_path(&path, &SecurityConfig::default()).unwrap();

        assert_eq!(reader.sheet_names(), vec!["Sheet1".to_string()]);
        let table = reader.read_table(&SheetSelector::First).unwrap();
        assert_eq!(table.columns(), &["id", "name"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.get(0, "id"), Some(&CellValue::Number(3.0)));
        assert_eq!(
            table.get(2, "name"),
            Some(&CellValue::String("eve".to_string()))
        );
    }

    #[test]
    fn test_open_reader_rejects_invalid_data() {
        let result = WorkbookReader::open_reader(
            Cursor::new(b"not a workbook".to_vec()),
            &SecurityConfig::default(),
        );
        assert!(matches!(result, Err(MergeError::Parse(_))));
    }

    #[test]
    fn test_open_reader_enforces_size_limit() {
        let security = SecurityConfig {
            max_input_file_size: 4,
        };
        let result = WorkbookReader::open_reader(Cursor::new(vec![0u8; 16]), &security);
        assert!(matches!(result, Err(MergeError::SecurityViolation(_))));
    }
}
