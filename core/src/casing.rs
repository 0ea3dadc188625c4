//! Key rewriting rules between `snake_case` and `camelCase`.
//!
//! # Design
//! Both rules are purely lexical and ASCII-driven. Keys that carry no casing
//! marker are returned borrowed, so transcoding an already-normalized payload
//! allocates nothing for its keys.
//!
//! The camel→snake rule inserts `_` before *every* ASCII uppercase letter,
//! including a leading one: `Id` becomes `_id`. The snake→camel rule maps
//! `_id` back to `Id`, so such keys still round-trip.

use std::borrow::Cow;

/// Target naming convention for object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCase {
    /// `produtoId`
    Camel,
    /// `produto_id`
    Snake,
}

impl KeyCase {
    /// Rewrite `key` into this convention.
    pub fn convert(self, key: &str) -> Cow<'_, str> {
        match self {
            KeyCase::Camel => snake_to_camel(key),
            KeyCase::Snake => camel_to_snake(key),
        }
    }
}

/// Replace every `_` followed by a lowercase ASCII letter with that letter
/// uppercased. Scans left to right; matches never overlap.
///
/// ```
/// use pdv_core::casing::snake_to_camel;
/// assert_eq!(snake_to_camel("preco_venda"), "precoVenda");
/// assert_eq!(snake_to_camel("a__b"), "a_B");
/// assert_eq!(snake_to_camel("item_1"), "item_1");
/// ```
pub fn snake_to_camel(key: &str) -> Cow<'_, str> {
    if !key.contains('_') {
        return Cow::Borrowed(key);
    }

    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(next) = chars.next_if(|n| n.is_ascii_lowercase()) {
                out.push(next.to_ascii_uppercase());
                continue;
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Replace every ASCII uppercase letter with `_` followed by its lowercase
/// form.
///
/// ```
/// use pdv_core::casing::camel_to_snake;
/// assert_eq!(camel_to_snake("quantidadeTotal"), "quantidade_total");
/// assert_eq!(camel_to_snake("Id"), "_id");
/// ```
pub fn camel_to_snake(key: &str) -> Cow<'_, str> {
    if !key.bytes().any(|b| b.is_ascii_uppercase()) {
        return Cow::Borrowed(key);
    }

    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
