//! Discovery Module
//!
//! 入力フォルダからExcelファイルを列挙するモジュール。
//! 拡張子のみで判定し、ファイルの中身は確認しません。

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::debug;

use crate::api::FileOrder;
use crate::error::MergeError;

/// 入力ファイルの検索パターン（列挙順）
pub(crate) const INPUT_PATTERNS: [&str; 2] = ["*.xlsx", "*.xls"];

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

/// ファイル名が入力パターンのいずれかに一致するか
///
/// `discover_inputs`と同じ照合規則を使います。
pub(crate) fn matches_input_pattern(file_name: &str) -> bool {
    let options = match_options();
    INPUT_PATTERNS.iter().any(|pattern| {
        Pattern::new(pattern)
            .map(|p| p.matches_with(file_name, options))
            .unwrap_or(false)
    })
}

/// フォルダ内のExcelファイルを列挙する
///
/// 拡張子の大文字・小文字は区別します（`A.XLSX`は対象外）。
/// ドットで始まる隠しファイルとディレクトリは除外します。
/// フォルダが存在しない場合は空のリストを返します。
///
/// # 戻り値
///
/// * `Ok(Vec<PathBuf>)` - `order`に従って並べたファイルパス
/// * `Err(MergeError)` - パターンの構築またはディレクトリ走査に失敗した場合
pub(crate) fn discover_inputs(folder: &Path, order: FileOrder) -> Result<Vec<PathBuf>, MergeError> {
    let options = match_options();

    // フォルダ名に含まれる`[`や`*`をメタ文字として扱わないようにエスケープ
    let escaped_folder = Pattern::escape(&folder.to_string_lossy());

    let mut files = Vec::new();
    for pattern in INPUT_PATTERNS {
        let full_pattern = Path::new(&escaped_folder).join(pattern);
        let mut matches = Vec::new();
        for entry in glob_with(&full_pattern.to_string_lossy(), options)? {
            let path = entry?;
            if path.is_file() {
                debug!(path = %path.display(), "discovered input file");
                matches.push(path);
            }
        }
        matches.sort();
        files.extend(matches);
    }

    if order == FileOrder::Sorted {
        files.sort();
    }

    Ok(files)
}
