//! Security Module
//!
//! 入力ファイルのサイズ制限と、出力ファイル名の検証を提供するモジュール。

use crate::discovery::matches_input_pattern;
use crate::error::MergeError;

/// 入力ファイルの最大サイズのデフォルト値（2GB）
pub(crate) const DEFAULT_MAX_INPUT_FILE_SIZE: u64 = 2_147_483_648;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 入力サイズが上限以内かを検証する
    pub fn check_input_size(&self, size: u64) -> Result<(), MergeError> {
        if size > self.max_input_file_size {
            return Err(MergeError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                size, self.max_input_file_size
            )));
        }
        Ok(())
    }
}

/// 出力ファイル名の検証
///
/// 出力は常に入力フォルダの直下に作成されるため、パス要素を含む名前は拒否します。
/// 次回の実行で入力として読み込まれないよう、入力パターンに一致する名前も拒否します。
///
/// # 戻り値
///
/// * `Ok(())` - ファイル名が安全な場合
/// * `Err(String)` - 空、絶対パス、`.`/`..`、パス区切り文字を含む、入力パターンに一致する場合
pub(crate) fn validate_output_file_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Empty output file name is not allowed".to_string());
    }

    if name.starts_with('/') || name.starts_with("C:\\") || name.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", name));
    }

    if name == "." || name == ".." {
        return Err(format!("Path traversal detected: {}", name));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(format!("Path separator in output file name: {}", name));
    }

    if matches_input_pattern(name) {
        return Err(format!(
            "Output file name would be read back as an input: {}",
            name
        ));
    }

    Ok(())
}
