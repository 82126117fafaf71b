//! # CIF 行分类器
//!
//! 在任何语义提取之前，先把原始文本切分为带行号的分类记录，
//! 后续的数据块定位都只在这个记录序列上进行，不再反复扫描原文。
//!
//! ## 容错
//! - 去除 Windows 换行符与行首尾空白
//! - `;` 包围的多行文本字段整体标记为 `Text`，其内容不会被误认为标签或数据
//! - 数值允许带括号标准差，如 `1.234(5)` -> 1.234
//!
//! ## 依赖关系
//! - 被 `parsers/cif/mod.rs` 使用
//! - 使用 `regex` 解析数值

use regex::Regex;
use std::sync::LazyLock;

/// 带标准差后缀的 CIF 数值
static CIF_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)(?:\(\d+\))?$").unwrap()
});

/// 行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// 空行
    Blank,
    /// `#` 注释
    Comment,
    /// `loop_`
    Loop,
    /// `data_xxx`
    DataBlock(&'a str),
    /// `_tag [value]`
    Tag {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `;` 多行文本字段（含首尾分隔行）
    Text,
    /// 其他数据行
    Data(&'a str),
}

/// 分类后的行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CifLine<'a> {
    /// 行号（从 1 开始）
    pub number: usize,
    pub kind: LineKind<'a>,
}

impl<'a> CifLine<'a> {
    pub fn is_tag(&self) -> bool {
        matches!(self.kind, LineKind::Tag { .. })
    }

    pub fn tag_name(&self) -> Option<&'a str> {
        match self.kind {
            LineKind::Tag { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// 将 CIF 文本切分为分类记录
pub fn tokenize(content: &str) -> Vec<CifLine<'_>> {
    let mut lines = Vec::new();
    let mut in_text_field = false;

    for (i, raw) in content.lines().enumerate() {
        let raw = raw.trim_end_matches('\r');
        let line = raw.trim();

        let kind = if raw.starts_with(';') {
            in_text_field = !in_text_field;
            LineKind::Text
        } else if in_text_field {
            LineKind::Text
        } else if line.is_empty() {
            LineKind::Blank
        } else if line.starts_with('#') {
            LineKind::Comment
        } else if line.eq_ignore_ascii_case("loop_") {
            LineKind::Loop
        } else if line
            .get(..5)
            .is_some_and(|p| p.eq_ignore_ascii_case("data_"))
        {
            LineKind::DataBlock(&line[5..])
        } else if line.starts_with('_') {
            let mut parts = line.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or(line);
            let value = parts.next().map(str::trim).filter(|v| !v.is_empty());
            LineKind::Tag { name, value }
        } else {
            LineKind::Data(line)
        };

        lines.push(CifLine {
            number: i + 1,
            kind,
        });
    }

    lines
}

/// 解析 CIF 数值，去除括号标准差；溢出为无穷的数值视为无效
pub fn parse_cif_number(token: &str) -> Option<f64> {
    let caps = CIF_NUMBER.captures(token.trim())?;
    caps.get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cif_number() {
        assert_eq!(parse_cif_number("5.43(2)"), Some(5.43));
        assert_eq!(parse_cif_number("1.234(5)"), Some(1.234));
        assert_eq!(parse_cif_number("90"), Some(90.0));
        assert_eq!(parse_cif_number("-0.25"), Some(-0.25));
        assert_eq!(parse_cif_number(".5"), Some(0.5));
        assert_eq!(parse_cif_number("1.5e-3"), Some(0.0015));
        assert_eq!(parse_cif_number("?"), None);
        assert_eq!(parse_cif_number("."), None);
        assert_eq!(parse_cif_number("abc"), None);
        assert_eq!(parse_cif_number("1.2(3"), None);
    }

    #[test]
    fn test_overflowing_number_rejected() {
        assert_eq!(parse_cif_number("1e999"), None);
        assert_eq!(parse_cif_number("-1e400(2)"), None);
        assert_eq!(parse_cif_number("1e300"), Some(1e300));
    }

    #[test]
    fn test_tokenize_kinds() {
        let content = "data_NaCl\r\n# comment\r\n_cell_length_a 5.64(1)\r\nloop_\r\n_atom_site_label\r\nNa1 0 0 0\r\n\r\n";
        let lines = tokenize(content);

        assert_eq!(lines[0].kind, LineKind::DataBlock("NaCl"));
        assert_eq!(lines[1].kind, LineKind::Comment);
        assert_eq!(
            lines[2].kind,
            LineKind::Tag {
                name: "_cell_length_a",
                value: Some("5.64(1)")
            }
        );
        assert_eq!(lines[3].kind, LineKind::Loop);
        assert_eq!(
            lines[4].kind,
            LineKind::Tag {
                name: "_atom_site_label",
                value: None
            }
        );
        assert_eq!(lines[5].kind, LineKind::Data("Na1 0 0 0"));
        assert_eq!(lines[5].number, 6);
        assert_eq!(lines[6].kind, LineKind::Blank);
    }

    #[test]
    fn test_text_field_is_opaque() {
        let content = "_publ_section_title\n;\n_not_a_tag here\nloop_\n;\n_cell_length_a 3.0\n";
        let lines = tokenize(content);

        assert!(lines[1..5].iter().all(|l| l.kind == LineKind::Text));
        assert_eq!(lines[5].tag_name(), Some("_cell_length_a"));
    }
}
