//! Builder Module
//!
//! Fluent Builder APIを提供し、`Merger`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::api::{DateFormat, FileOrder, SheetSelector};
use crate::error::MergeError;
use crate::formatter::{validate_date_format, CellFormatter};
use crate::output::CsvFormatter;
use crate::parser::WorkbookReader;
use crate::security::{validate_output_file_name, SecurityConfig, DEFAULT_MAX_INPUT_FILE_SIZE};
use crate::table::Table;

/// デフォルトの入力フォルダ
pub const DEFAULT_INPUT_FOLDER: &str = "DTM/";

/// デフォルトの出力ファイル名（入力フォルダ直下に作成）
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "DTM.csv";

/// 結合処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct MergeConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 日付形式
    pub date_format: DateFormat,

    /// 区切り文字
    pub delimiter: u8,

    /// 欠損値の出力文字列
    pub missing_value: String,

    /// 出力ファイル名
    pub output_file_name: String,

    /// 入力ファイルの結合順序
    pub file_order: FileOrder,

    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            date_format: DateFormat::Iso8601,
            delimiter: b',',
            missing_value: String::new(),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            file_order: FileOrder::ByExtension,
            max_input_file_size: DEFAULT_MAX_INPUT_FILE_SIZE,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxmerge::{MergerBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxmerge::MergeError> {
/// let merger = MergerBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Data".to_string()))
///     .with_output_file_name("combined.csv")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MergerBuilder {
    /// 内部設定（構築中）
    config: MergeConfig,
}

impl MergerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 先頭のシート
    /// - 日付形式: ISO 8601
    /// - 区切り文字: `,`
    /// - 欠損値: 空文字列
    /// - 出力ファイル名: `DTM.csv`
    /// - 結合順序: `*.xlsx`の後に`*.xls`
    /// - 入力ファイルの最大サイズ: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 日付の出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 区切り文字を指定する
    ///
    /// ASCII文字のみ指定できます。ダブルクォートと改行は`build()`時にエラーになります。
    ///
    /// ```rust,no_run
    /// use xlsxmerge::MergerBuilder;
    ///
    /// // タブ区切り
    /// let builder = MergerBuilder::new().with_delimiter(b'\t');
    /// ```
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// 欠損値（列が存在しないセル、空セル）の出力文字列を指定する
    pub fn with_missing_value(mut self, marker: impl Into<String>) -> Self {
        self.config.missing_value = marker.into();
        self
    }

    /// 出力ファイル名を指定する
    ///
    /// 出力は常に入力フォルダの直下に作成されます。パス区切り文字は使用できません。
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_file_name = name.into();
        self
    }

    /// 入力ファイルの結合順序を指定する
    pub fn with_file_order(mut self, order: FileOrder) -> Self {
        self.config.file_order = order;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_file_size(mut self, bytes: u64) -> Self {
        self.config.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Merger`を構築する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Merger)` - 設定が有効な場合
    /// * `Err(MergeError::Config)` - 区切り文字、日付形式、サイズ上限が無効な場合
    /// * `Err(MergeError::SecurityViolation)` - 出力ファイル名にパス要素が含まれる場合、
    ///   または入力パターンに一致する場合
    pub fn build(self) -> Result<Merger, MergeError> {
        // 1. 区切り文字の検証
        let delimiter = self.config.delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, b'"' | b'\n' | b'\r') {
            return Err(MergeError::Config(format!(
                "Invalid delimiter: {:?}",
                delimiter as char
            )));
        }

        // 2. カスタム日付形式の検証
        validate_date_format(&self.config.date_format)?;

        // 3. サイズ上限の検証
        if self.config.max_input_file_size == 0 {
            return Err(MergeError::Config(
                "Maximum input file size must be greater than zero".to_string(),
            ));
        }

        // 4. 出力ファイル名の検証
        validate_output_file_name(&self.config.output_file_name)
            .map_err(MergeError::SecurityViolation)?;

        Ok(Merger::new(self.config))
    }
}

/// 結合処理の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// 結合したファイル（結合順）
    pub files: Vec<PathBuf>,

    /// 出力したデータ行数（ヘッダーを除く）
    pub rows: usize,

    /// 出力した列名
    pub columns: Vec<String>,

    /// 出力ファイルのパス
    pub output: PathBuf,
}

impl MergeReport {
    /// 結合したファイル数
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// 利用者向けの1行サマリー
    ///
    /// 例: `Merged 2 Excel files into DTM.csv`
    pub fn summary(&self) -> String {
        let name = self
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output.display().to_string());
        format!("Merged {} Excel files into {}", self.file_count(), name)
    }
}

/// 結合処理のファサード
///
/// フォルダ内のExcelファイルを1つのCSVに結合するためのメインエントリーポイントです。
/// 処理は逐次的で、最初のエラーで全体を中断します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxmerge::MergerBuilder;
///
/// # fn main() -> Result<(), xlsxmerge::MergeError> {
/// let merger = MergerBuilder::new().build()?;
/// let report = merger.merge_folder("DTM/")?;
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Merger {
    /// 結合設定
    config: MergeConfig,

    /// セルフォーマッター
    cells: CellFormatter,

    /// CSV出力
    csv: CsvFormatter,

    /// 入力サイズ制限
    security: SecurityConfig,
}

impl Merger {
    pub(crate) fn new(config: MergeConfig) -> Self {
        Self {
            cells: CellFormatter::new(config.date_format.clone(), config.missing_value.clone()),
            csv: CsvFormatter::new(config.delimiter),
            security: SecurityConfig {
                max_input_file_size: config.max_input_file_size,
            },
            config,
        }
    }

    /// 出力ファイル名
    pub fn output_file_name(&self) -> &str {
        &self.config.output_file_name
    }

    /// フォルダ内の入力ファイルを結合順に列挙する
    ///
    /// フォルダが存在しない場合は空のリストを返します。
    pub fn discover(&self, folder: impl AsRef<Path>) -> Result<Vec<PathBuf>, MergeError> {
        crate::discovery::discover_inputs(folder.as_ref(), self.config.file_order)
    }

    /// 1つのExcelファイルを表として読み込む
    ///
    /// 失敗した場合は`MergeError::Load`でファイルパスを付与して返します。
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Table, MergeError> {
        let path = path.as_ref();
        let table = WorkbookReader::open_path(path, &self.security)
            .and_then(|mut reader| reader.read_table(&self.config.sheet_selector))
            .map_err(|e| e.while_loading(path))?;

        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded workbook"
        );
        Ok(table)
    }

    /// リーダーからExcelデータを表として読み込む
    ///
    /// XLSX/XLSの判定は内容から行います。
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Table, MergeError> {
        let mut workbook = WorkbookReader::open_reader(reader, &self.security)?;
        workbook.read_table(&self.config.sheet_selector)
    }

    /// 複数の表を行方向に結合する
    ///
    /// 列は和集合になり、存在しない列のセルは欠損値になります。
    pub fn concat(&self, tables: Vec<Table>) -> Result<Table, MergeError> {
        Table::concat(tables)
    }

    /// 表をCSVとして書き出す
    pub fn write_csv<W: Write>(&self, table: &Table, writer: W) -> Result<(), MergeError> {
        self.csv.render(table, &self.cells, writer)
    }

    /// 指定したファイルを順に読み込んで結合し、CSVとして書き出す
    ///
    /// すべてのファイルの読み込みに成功するまで、`writer`には何も書き込みません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 書き出した表
    /// * `Err(MergeError::NoInputFiles)` - `paths`が空の場合
    /// * `Err(MergeError::Load)` - いずれかのファイルの読み込みに失敗した場合
    pub fn merge_files<P, W>(&self, paths: &[P], writer: W) -> Result<Table, MergeError>
    where
        P: AsRef<Path>,
        W: Write,
    {
        if paths.is_empty() {
            return Err(MergeError::NoInputFiles("empty file list".to_string()));
        }

        let tables = paths
            .iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        let table = self.concat(tables)?;

        self.write_csv(&table, writer)?;
        Ok(table)
    }

    /// フォルダ内のExcelファイルを結合し、フォルダ直下にCSVを書き出す
    ///
    /// # 処理フロー
    ///
    /// 1. `*.xlsx`と`*.xls`の列挙
    /// 2. 各ファイルの読み込み（1つでも失敗したら中断）
    /// 3. 表の結合
    /// 4. `<folder>/<出力ファイル名>`を作成（既存ファイルは上書き）して書き出し
    ///
    /// 入力が1つもない場合は`MergeError::NoInputFiles`を返し、出力ファイルは作成しません。
    pub fn merge_folder(&self, folder: impl AsRef<Path>) -> Result<MergeReport, MergeError> {
        let folder = folder.as_ref();

        // 1. 列挙
        let files = self.discover(folder)?;
        if files.is_empty() {
            return Err(MergeError::NoInputFiles(format!(
                "no *.xlsx or *.xls files in '{}'",
                folder.display()
            )));
        }
        debug!(count = files.len(), folder = %folder.display(), "merging input files");

        // 2. 読み込み
        let tables = files
            .iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        // 3. 結合
        let table = self.concat(tables)?;

        // 4. 書き出し（File::createで既存の内容は切り詰められる）
        let output = folder.join(&self.config.output_file_name);
        let mut writer = BufWriter::new(File::create(&output)?);
        self.write_csv(&table, &mut writer)?;
        writer.flush()?;

        info!(
            output = %output.display(),
            files = files.len(),
            rows = table.row_count(),
            "wrote merged csv"
        );

        Ok(MergeReport {
            rows: table.row_count(),
            columns: table.columns().to_vec(),
            files,
            output,
        })
    }

    /// メモリ上の複数のExcelデータを結合し、CSV文字列として返す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::io::Cursor;
    /// use xlsxmerge::MergerBuilder;
    ///
    /// # fn main() -> Result<(), xlsxmerge::MergeError> {
    /// let merger = MergerBuilder::new().build()?;
    /// let workbooks: Vec<Vec<u8>> = vec![]; // Excelファイルのバイト列
    /// let csv = merger.merge_to_string(workbooks.into_iter().map(Cursor::new))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge_to_string<R, I>(&self, inputs: I) -> Result<String, MergeError>
    where
        R: Read,
        I: IntoIterator<Item = R>,
    {
        let tables = inputs
            .into_iter()
            .map(|input| self.load_reader(input))
            .collect::<Result<Vec<_>, _>>()?;
        let table = self.concat(tables)?;

        let mut buffer = Vec::new();
        self.write_csv(&table, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            MergeError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }
}
