pub mod chunk_naming;
pub mod chunk_size;
pub mod compression;
pub mod statement;
