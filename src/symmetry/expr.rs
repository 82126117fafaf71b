//! # 对称操作表达式解析器
//!
//! 递归下降解析单个坐标分量表达式（如 `-x+1/2`、`x-y`、`0.5+z`），
//! 直接化简为仿射形式 `c·(x, y, z) + t`。
//!
//! ## 语法
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('+' | '-') unary | atom
//! atom   := NUMBER | 'x' | 'y' | 'z' | '(' expr ')'
//! NUMBER := digits ['.' digits] | '.' digits
//! ```
//! 变量不区分大小写。乘法至少一侧须为常数，除数须为非零常数，
//! 任何其他输入都被拒绝。
//!
//! ## 依赖关系
//! - 被 `symmetry/operator.rs` 使用
//! - 无外部模块依赖

/// 仿射表达式 `coeffs · (x, y, z) + constant`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub coeffs: [f64; 3],
    pub constant: f64,
}

impl Affine {
    fn constant(value: f64) -> Self {
        Affine {
            coeffs: [0.0; 3],
            constant: value,
        }
    }

    fn variable(axis: usize) -> Self {
        let mut coeffs = [0.0; 3];
        coeffs[axis] = 1.0;
        Affine {
            coeffs,
            constant: 0.0,
        }
    }

    fn is_constant(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }

    fn add(self, other: Affine) -> Affine {
        Affine {
            coeffs: [
                self.coeffs[0] + other.coeffs[0],
                self.coeffs[1] + other.coeffs[1],
                self.coeffs[2] + other.coeffs[2],
            ],
            constant: self.constant + other.constant,
        }
    }

    fn scale(self, factor: f64) -> Affine {
        Affine {
            coeffs: self.coeffs.map(|c| c * factor),
            constant: self.constant * factor,
        }
    }

    fn neg(self) -> Affine {
        self.scale(-1.0)
    }

    fn mul(self, other: Affine) -> Result<Affine, String> {
        if other.is_constant() {
            Ok(self.scale(other.constant))
        } else if self.is_constant() {
            Ok(other.scale(self.constant))
        } else {
            Err("product of two coordinates is not affine".to_string())
        }
    }

    fn div(self, other: Affine) -> Result<Affine, String> {
        if !other.is_constant() {
            return Err("division by a coordinate is not affine".to_string());
        }
        if other.constant == 0.0 {
            return Err("division by zero".to_string());
        }
        Ok(self.scale(1.0 / other.constant))
    }

    /// 代入 (x, y, z) 求值
    pub fn eval(&self, p: &[f64; 3]) -> f64 {
        self.coeffs[0] * p[0] + self.coeffs[1] * p[1] + self.coeffs[2] * p[2] + self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Var(usize),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(src: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => {
                i += 1;
                continue;
            }
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            'x' | 'X' => tokens.push(Token::Var(0)),
            'y' | 'Y' => tokens.push(Token::Var(1)),
            'z' | 'Z' => tokens.push(Token::Var(2)),
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value: f64 = literal
                    .parse()
                    .ok()
                    .filter(|v: &f64| v.is_finite())
                    .ok_or_else(|| format!("invalid number '{}'", literal))?;
                tokens.push(Token::Num(value));
                continue;
            }
            other => return Err(format!("unexpected character '{}' at position {}", other, i)),
        }
        i += 1;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<Affine, String> {
        let mut value = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.pos += 1;
                    value = value.add(self.term()?);
                }
                Token::Minus => {
                    self.pos += 1;
                    value = value.add(self.term()?.neg());
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Affine, String> {
        let mut value = self.unary()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.pos += 1;
                    value = value.mul(self.unary()?)?;
                }
                Token::Slash => {
                    self.pos += 1;
                    value = value.div(self.unary()?)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<Affine, String> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(self.unary()?.neg())
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<Affine, String> {
        match self.next() {
            Some(Token::Num(v)) => Ok(Affine::constant(v)),
            Some(Token::Var(axis)) => Ok(Affine::variable(axis)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err("missing closing parenthesis".to_string()),
                }
            }
            Some(token) => Err(format!("unexpected token {:?}", token)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

/// 解析单个分量表达式为仿射形式
pub fn parse_affine(src: &str) -> Result<Affine, String> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(format!(
            "unexpected trailing input after token {}",
            parser.pos
        ));
    }
    Ok(value)
}
