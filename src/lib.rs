//! xlsxmerge - Merge a folder of Excel workbooks into a single CSV file
//!
//! フォルダ内のすべてのExcelファイル（`*.xlsx`, `*.xls`）を読み込み、
//! 行を1つの表に結合して、区切り文字付きテキスト（CSV）として書き出します。
//!
//! - 各ファイルの1行目をヘッダーとして扱います
//! - 列が異なるファイルは列の和集合で結合し、存在しないセルは欠損値になります
//! - 結合順序は決定的です（`*.xlsx`をパス順、その後に`*.xls`をパス順）
//! - 1つでも読み込みに失敗した場合は全体を中断し、出力ファイルは作成しません
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxmerge::MergerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let merger = MergerBuilder::new().build()?;
//!
//!     // DTM/*.xlsx + DTM/*.xls -> DTM/DTM.csv
//!     let report = merger.merge_folder("DTM/")?;
//!     println!("{}", report.summary());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xlsxmerge::{FileOrder, MergerBuilder, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let merger = MergerBuilder::new()
//!         .with_sheet_selector(SheetSelector::Name("Data".to_string()))
//!         .with_delimiter(b';')
//!         .with_missing_value("NA")
//!         .with_file_order(FileOrder::Sorted)
//!         .with_output_file_name("combined.csv")
//!         .build()?;
//!
//!     merger.merge_folder("reports/")?;
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod discovery;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod table;
mod types;

// 公開API
pub use api::{DateFormat, FileOrder, SheetSelector};
pub use builder::{
    MergeReport, Merger, MergerBuilder, DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FILE_NAME,
};
pub use error::MergeError;
pub use table::Table;
pub use types::CellValue;
