//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// xlsxmergeクレート全体で使用するエラー型
///
/// ファイルの列挙、ワークブックの読み込み、テーブルの結合、CSVの書き出し中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
/// どのエラーも処理全体を中断させます（部分的な出力は行いません）。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxmerge::{MergeError, MergerBuilder};
///
/// # fn main() -> Result<(), MergeError> {
/// let merger = MergerBuilder::new().build()?;
/// match merger.merge_folder("DTM/") {
///     Ok(report) => println!("{}", report.summary()),
///     Err(MergeError::NoInputFiles(location)) => eprintln!("nothing to merge in {}", location),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum MergeError {
    /// I/O操作中に発生したエラー
    ///
    /// 出力ファイルの作成失敗、書き込み失敗など。
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// CSVの書き出し中に発生したエラー
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 検索パターンの構築に失敗したエラー
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// ディレクトリ走査中に発生したエラー
    #[error("Failed to enumerate input files: {0}")]
    Glob(#[from] glob::GlobError),

    /// 結合対象のファイルが1つもない
    ///
    /// フォルダが存在しない場合も、列挙結果が空になるためこのエラーになります。
    #[error("No input files to merge: {0}")]
    NoInputFiles(String),

    /// 特定の入力ファイルの読み込みに失敗したエラー
    ///
    /// どのファイルで失敗したかを`path`に保持し、原因を`source`に保持します。
    #[error("Failed to load '{}': {source}", path.display())]
    Load {
        /// 失敗したファイルのパス
        path: PathBuf,
        /// 原因となったエラー
        #[source]
        source: Box<MergeError>,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `MergerBuilder::build()`時の検証や、指定したシートが存在しない場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルのサイズ上限超過や、出力ファイル名にパス要素が含まれる場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl MergeError {
    /// 入力ファイルのパスを付与したエラーに変換する
    pub(crate) fn while_loading(self, path: impl Into<PathBuf>) -> Self {
        MergeError::Load {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: MergeError = io_err.into();

        match error {
            MergeError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let error: MergeError = calamine::Error::Msg("Corrupted file").into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse Excel file"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_pattern_error_conversion() {
        let pattern_err = glob::Pattern::new("[").unwrap_err();
        let error: MergeError = pattern_err.into();
        assert!(matches!(error, MergeError::Pattern(_)));
        assert!(error.to_string().starts_with("Invalid search pattern"));
    }

    #[test]
    fn test_no_input_files_display() {
        let error = MergeError::NoInputFiles("DTM/".to_string());
        assert_eq!(error.to_string(), "No input files to merge: DTM/");
    }

    #[test]
    fn test_load_error_keeps_path_and_source() {
        let error =
            MergeError::from(calamine::Error::Msg("bad header")).while_loading("DTM/broken.xls");

        let msg = error.to_string();
        assert!(msg.contains("DTM/broken.xls"));
        assert!(msg.contains("bad header"));

        match &error {
            MergeError::Load { path, source } => {
                assert_eq!(path, &PathBuf::from("DTM/broken.xls"));
                assert!(matches!(**source, MergeError::Parse(_)));
            }
            _ => panic!("Expected Load error"),
        }
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), MergeError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(MergeError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let io_err: MergeError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let config_err = MergeError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = MergeError::SecurityViolation("too large".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
