//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{NaiveDateTime, TimeDelta};

/// セルの値を表す列挙型
///
/// calamineの`Data`から変換された、書式適用前の値です。
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CellValue {
    /// 整数
    Int(i64),

    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時
    DateTime(NaiveDateTime),

    /// 期間（時刻書式のセル）
    Duration(TimeDelta),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル、または結合時に存在しなかった列
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// ヘッダー行のセルを列名として解釈する
    ///
    /// 空セルおよび空文字列は`None`を返します。呼び出し側で`Unnamed: N`に置き換えます。
    pub(crate) fn as_header_text(&self) -> Option<String> {
        let text = match self {
            CellValue::Int(i) => i.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => format_bool(*b).to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Duration(d) => format_duration(*d),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => return None,
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// 数値を文字列に変換
///
/// 整数値の浮動小数点数は小数部なしで出力します（`3.0` → `3`）。
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        // -0.0も"0"にする
        return "0".to_string();
    }
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

pub(crate) fn format_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// 期間を`HH:MM:SS`形式に変換（24時間を超える場合も時間で表す）
pub(crate) fn format_duration(d: TimeDelta) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
