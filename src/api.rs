//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 各ワークブックからどのシートを読み込むかを指定します。
/// 1ファイルにつき1シートだけが結合対象になります。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭のシートを読み込む（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),
}

/// 日付の出力形式
///
/// Excelの日付セルをCSVに書き出す際の形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式
    ///
    /// 時刻が0時ちょうどの場合は日付のみ（`2025-11-20`）、
    /// それ以外は日時（`2025-11-20 13:45:00`）を出力します。
    #[default]
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxmerge::{DateFormat, MergerBuilder};
    ///
    /// # fn main() -> Result<(), xlsxmerge::MergeError> {
    /// let merger = MergerBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// 入力ファイルの結合順序
///
/// ファイルシステムの列挙順は環境依存のため、どちらの方式でもパスでソートします。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum FileOrder {
    /// 拡張子ごとにまとめる（デフォルト）
    ///
    /// すべての`*.xlsx`（パス順）の後に、すべての`*.xls`（パス順）を並べます。
    #[default]
    ByExtension,

    /// 拡張子を区別せず、パス全体の辞書順に並べる
    Sorted,
}
