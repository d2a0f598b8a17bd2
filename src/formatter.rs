//! Formatter Module
//!
//! セル値をCSVフィールドの文字列に変換するモジュール。
//! クォート処理はCSVライター側で行うため、ここではエスケープしません。

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::api::DateFormat;
use crate::error::MergeError;
use crate::types::{format_bool, format_duration, format_number, CellValue};

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Clone)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 欠損値の出力文字列
    missing_value: String,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new(date_format: DateFormat, missing_value: impl Into<String>) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
            missing_value: missing_value.into(),
        }
    }

    /// セル値をフォーマット
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Int(i) => i.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => format_bool(*b).to_string(),
            CellValue::DateTime(dt) => self.date_formatter.format(dt),
            CellValue::Duration(d) => format_duration(*d),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => self.missing_value.clone(),
        }
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::new(DateFormat::Iso8601, "")
    }
}

/// 日付フォーマッター
#[derive(Debug, Clone)]
pub(crate) struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    /// 日時をフォーマット
    ///
    /// `DateFormat::Custom`の書式文字列は`validate_date_format`で検証済みであること。
    pub fn format(&self, dt: &NaiveDateTime) -> String {
        match &self.date_format {
            DateFormat::Iso8601 => {
                if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            DateFormat::Custom(format_str) => dt.format(format_str).to_string(),
        }
    }
}

/// カスタム日付形式を検証する
///
/// 空文字列や、chronoが解釈できない書式指定子を含む場合はエラーを返します。
/// `%z`のようにタイムゾーンを要求する指定子は`NaiveDateTime`では出力できないため、
/// 固定の日時で試し描画し、失敗した場合もエラーとします。
pub(crate) fn validate_date_format(format: &DateFormat) -> Result<(), MergeError> {
    if let DateFormat::Custom(format_str) = format {
        let invalid =
            || MergeError::Config(format!("Invalid date format string: '{}'", format_str));

        if format_str.is_empty()
            || StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
        {
            return Err(invalid());
        }

        let sample = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)?;
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(format_str)).is_err() || rendered.is_empty() {
            return Err(invalid());
        }
    }
    Ok(())
}
