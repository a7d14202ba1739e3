use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Longitud de los ids generados.
pub const ID_LENGTH: usize = 10;

/// Fuente de ids aleatorios.
///
/// Se inyecta en lugar de llamar al RNG global para que los tests puedan
/// fijar una semilla y obtener siempre la misma secuencia.
pub trait IdGenerator {
  /// Devuelve un id nuevo de [`ID_LENGTH`] caracteres `[A-Za-z0-9]`.
  fn generate(&mut self) -> String;
}

fn alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
  (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Generador respaldado por el RNG del hilo actual.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
  fn generate(&mut self) -> String {
    alphanumeric(&mut rand::rng(), ID_LENGTH)
  }
}

/// Generador determinista para tests y ejecuciones reproducibles.
#[derive(Debug, Clone)]
pub struct SeededIdGenerator {
  rng: StdRng,
}

impl SeededIdGenerator {
  pub fn new(seed: u64) -> Self {
    Self { rng: StdRng::seed_from_u64(seed) }
  }
}

impl IdGenerator for SeededIdGenerator {
  fn generate(&mut self) -> String {
    alphanumeric(&mut self.rng, ID_LENGTH)
  }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
  fn generate(&mut self) -> String {
    (**self).generate()
  }
}
