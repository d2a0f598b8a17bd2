//! Security Tests
//!
//! 入力サイズ制限と出力ファイル名の検証を確認します。

use rust_xlsxwriter::Workbook;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;
use xlsxmerge::{MergeError, MergerBuilder};

fn small_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "id").unwrap();
    worksheet.write_number(1, 0, 1.0).unwrap();
    workbook.save_to_buffer().unwrap()
}

/// 上限を超えるファイルは解析前に拒否される
#[test]
fn test_oversized_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("big.xlsx"), small_workbook()).unwrap();

    let merger = MergerBuilder::new()
        .with_max_input_file_size(64)
        .build()
        .unwrap();

    match merger.merge_folder(dir.path()) {
        Err(MergeError::Load { source, .. }) => {
            assert!(matches!(*source, MergeError::SecurityViolation(_)));
        }
        other => panic!("Expected Load error, got {:?}", other),
    }
    assert!(!dir.path().join("DTM.csv").exists());
}

/// メモリ上の入力にも同じ上限が適用される
#[test]
fn test_oversized_reader_is_rejected() {
    let merger = MergerBuilder::new()
        .with_max_input_file_size(64)
        .build()
        .unwrap();

    let result = merger.merge_to_string(vec![Cursor::new(small_workbook())]);
    assert!(matches!(result, Err(MergeError::SecurityViolation(_))));
}

/// 出力ファイル名で入力フォルダの外に書き込めない
#[test]
fn test_output_name_cannot_escape_folder() {
    for name in ["../escape.csv", "/tmp/escape.csv", "nested/out.csv", ""] {
        let result = MergerBuilder::new().with_output_file_name(name).build();
        assert!(
            matches!(result, Err(MergeError::SecurityViolation(_))),
            "output name {:?} should be rejected",
            name
        );
    }
}

/// 入力パターンに一致する出力名は次回の実行を壊すため拒否される
#[test]
fn test_output_name_matching_inputs_is_rejected() {
    for name in ["merged.xlsx", "DTM.xls"] {
        let result = MergerBuilder::new().with_output_file_name(name).build();
        assert!(
            matches!(result, Err(MergeError::SecurityViolation(_))),
            "output name {:?} should be rejected",
            name
        );
    }
}

/// `..`を含むだけの通常のファイル名は出力名として使える
#[test]
fn test_output_name_with_double_dot_is_allowed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.xlsx"), small_workbook()).unwrap();

    let merger = MergerBuilder::new()
        .with_output_file_name("report..csv")
        .build()
        .unwrap();
    let report = merger.merge_folder(dir.path()).unwrap();

    assert_eq!(report.output, dir.path().join("report..csv"));
    assert_eq!(
        fs::read_to_string(dir.path().join("report..csv")).unwrap(),
        "id\n1\n"
    );
}

/// 中身がExcelでないファイルは拡張子が正しくても解析エラーになる
#[test]
fn test_disguised_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("fake.xlsx"), b"PK\x03\x04 truncated zip").unwrap();

    let merger = MergerBuilder::new().build().unwrap();
    match merger.merge_folder(dir.path()) {
        Err(MergeError::Load { source, .. }) => {
            assert!(matches!(*source, MergeError::Parse(_)));
        }
        other => panic!("Expected Load error, got {:?}", other),
    }
}
