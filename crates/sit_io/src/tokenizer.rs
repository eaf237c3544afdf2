// crates/sit_io/src/tokenizer.rs

//! Shell 风格分词
//!
//! 空白分隔；双引号、单引号包裹的内容作为一个词（引号可与相邻字符拼接）；
//! 引号外反斜杠转义下一个字符，双引号内只转义 `"` 和 `\`，单引号内不转义。

use thiserror::Error;

/// 分词错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("引号未闭合: {0}")]
    UnterminatedQuote(char),

    #[error("行尾孤立的反斜杠")]
    TrailingEscape,
}

/// 把一行拆成词
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // 当前词是否已开始（区分空引号 "" 和没有词）
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\\' => {
                let escaped = chars.next().ok_or(TokenizeError::TrailingEscape)?;
                current.push(escaped);
                in_token = true;
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(TokenizeError::UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\')) => current.push(ch),
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(TokenizeError::UnterminatedQuote('"')),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(TokenizeError::UnterminatedQuote('"')),
                    }
                }
            }
            _ => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// 用双引号包裹自由文本，转义其中的 `"` 和 `\`
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// 注释行
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
