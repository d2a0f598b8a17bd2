//! Parser Module
//!
//! calamineを使用したExcelファイル（XLSX/XLS）の読み込み。

mod workbook;

pub(crate) use workbook::WorkbookReader;
