//! Core XML parsing primitives
//!
//! This module contains the fundamental building blocks for XML parsing:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: extracts tokens from a possibly incomplete read window
//! - Entities: XML entity decoding with Cow (zero-copy when possible)
//! - Attributes: Attribute parsing and extraction
//! - Encoding: BOM sniffing and encoding label checks
//! - Namespace: prefix resolution scopes

pub mod attributes;
pub mod encoding;
pub mod entities;
pub mod namespace;
pub mod scanner;
pub mod tokenizer;
