//! Integral types and compile-time constant evaluation.
//!
//! Only what can be decided from the syntax alone is evaluated: integer
//! literals, parentheses, unary minus, casts to integral types and the basic
//! arithmetic operators. Anything else yields `None` and the member is left
//! out of the request.

use syn::{BinOp, Expr, Lit, Type, UnOp};

pub const INTEGRAL_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

/// Rust's platform "int".
pub const DEFAULT_INTEGRAL_TYPE: &str = "i32";

pub fn is_integral(name: &str) -> bool {
    INTEGRAL_TYPES.contains(&name)
}

/// Name of `ty` when it is a primitive integral type.
pub fn integral_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .get_ident()
            .map(ToString::to_string)
            .filter(|name| is_integral(name)),
        Type::Paren(paren) => integral_type_name(&paren.elem),
        Type::Group(group) => integral_type_name(&group.elem),
        _ => None,
    }
}

/// Value of an integer constant expression.
pub fn evaluate(expr: &Expr) -> Option<i128> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Int(int) if int.suffix().is_empty() || is_integral(int.suffix()) => {
                let value = int.base10_parse::<i128>().ok()?;
                if int.suffix().is_empty() {
                    Some(value)
                } else {
                    cast(value, int.suffix())
                }
            }
            _ => None,
        },
        Expr::Paren(paren) => evaluate(&paren.expr),
        Expr::Group(group) => evaluate(&group.expr),
        Expr::Unary(unary) => match unary.op {
            UnOp::Neg(_) => evaluate(&unary.expr)?.checked_neg(),
            _ => None,
        },
        Expr::Cast(expr_cast) => {
            let target = integral_type_name(&expr_cast.ty)?;
            cast(evaluate(&expr_cast.expr)?, &target)
        }
        Expr::Binary(binary) => {
            let left = evaluate(&binary.left)?;
            let right = evaluate(&binary.right)?;
            match binary.op {
                BinOp::Add(_) => left.checked_add(right),
                BinOp::Sub(_) => left.checked_sub(right),
                BinOp::Mul(_) => left.checked_mul(right),
                BinOp::Div(_) => left.checked_div(right),
                BinOp::Rem(_) => left.checked_rem(right),
                _ => None,
            }
        }
        _ => None,
    }
}

/// `value as target`, following Rust's wrapping cast semantics.
fn cast(value: i128, target: &str) -> Option<i128> {
    let cast = match target {
        "i8" => value as i8 as i128,
        "i16" => value as i16 as i128,
        "i32" => value as i32 as i128,
        "i64" | "isize" => value as i64 as i128,
        "i128" => value,
        "u8" => value as u8 as i128,
        "u16" => value as u16 as i128,
        "u32" => value as u32 as i128,
        "u64" | "usize" => value as u64 as i128,
        // Values above i128::MAX cannot be represented; treat as unknown.
        "u128" => i128::try_from(value as u128).ok()?,
        _ => return None,
    };
    Some(cast)
}
