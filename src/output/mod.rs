//! Output Module
//!
//! 結合済みの表を区切り文字付きテキストとして書き出すモジュール。

mod formatters;

pub(crate) use formatters::CsvFormatter;
