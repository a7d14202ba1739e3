pub mod id_generator;

pub use id_generator::{ID_LENGTH, IdGenerator, RandomIdGenerator, SeededIdGenerator};
