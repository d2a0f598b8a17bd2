//! Output Formatters Implementation
//!
//! CSV形式の出力を提供します。エスケープは`csv`クレートに任せます。

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::MergeError;
use crate::formatter::CellFormatter;
use crate::table::Table;

/// CSV形式のフォーマッター
///
/// ヘッダー行の後にすべてのデータ行を出力します。行インデックス列は出力しません。
/// 区切り文字・ダブルクォート・改行を含むフィールドはダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
#[derive(Debug, Clone, Copy)]
pub(crate) struct CsvFormatter {
    delimiter: u8,
}

impl CsvFormatter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// 表をCSVとして書き出す
    ///
    /// 列が1つもない表の場合は何も書き出しません。
    pub fn render<W: Write>(
        &self,
        table: &Table,
        cells: &CellFormatter,
        writer: W,
    ) -> Result<(), MergeError> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        if table.column_count() == 0 {
            csv_writer.flush()?;
            return Ok(());
        }

        csv_writer.write_record(table.columns())?;
        for row in table.rows() {
            csv_writer.write_record(row.iter().map(|cell| cells.format_cell(cell)))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
