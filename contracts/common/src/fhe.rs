//! Ciphertext handles and the client interface of the encrypted-arithmetic
//! engine.
//!
//! Contracts in this workspace never hold plaintext for encrypted values.
//! They hold a [`Ciphertext`], an opaque 32-byte handle plus its declared
//! type, and ask an executor contract to combine handles into new ones.
//! The executor decides how the handle maps to an actual ciphertext.

use soroban_sdk::{contractclient, contracterror, contracttype, BytesN, Env};

/// Plaintext type carried by a ciphertext.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CipherKind {
    Bool = 0,
    U8 = 1,
    U32 = 2,
    U64 = 3,
}

impl CipherKind {
    /// Bit mask of the plaintext domain.
    pub fn mask(self) -> u64 {
        match self {
            CipherKind::Bool => 1,
            CipherKind::U8 => u8::MAX as u64,
            CipherKind::U32 => u32::MAX as u64,
            CipherKind::U64 => u64::MAX,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, CipherKind::Bool)
    }
}

/// Opaque reference to an encrypted value held by an executor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ciphertext {
    pub handle: BytesN<32>,
    pub kind: CipherKind,
}

impl Ciphertext {
    pub fn is_bool(&self) -> bool {
        self.kind == CipherKind::Bool
    }
}

/// Errors raised by an executor. Callers going through the generated client
/// see these as a trap of the whole invocation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FheError {
    UnknownHandle = 1,
    KindMismatch = 2,
}

/// Operation set every encrypted-arithmetic executor exposes.
///
/// There is intentionally no decryption entry point.
#[contractclient(name = "FheExecutorClient")]
pub trait FheExecutor {
    /// Wrap a public plaintext into a ciphertext of `kind`.
    fn trivial_encrypt(env: Env, value: u64, kind: CipherKind) -> Result<Ciphertext, FheError>;

    /// Re-type an integer ciphertext, truncating when narrowing.
    fn cast(env: Env, value: Ciphertext, kind: CipherKind) -> Result<Ciphertext, FheError>;

    /// Wrapping addition of two integer ciphertexts of the same kind.
    fn add(env: Env, lhs: Ciphertext, rhs: Ciphertext) -> Result<Ciphertext, FheError>;

    /// Wrapping subtraction of two integer ciphertexts of the same kind.
    fn sub(env: Env, lhs: Ciphertext, rhs: Ciphertext) -> Result<Ciphertext, FheError>;

    /// Encrypted `lhs < rhs`, as a `Bool` ciphertext.
    fn lt(env: Env, lhs: Ciphertext, rhs: Ciphertext) -> Result<Ciphertext, FheError>;

    /// Encrypted `if cond { if_true } else { if_false }`.
    fn select(
        env: Env,
        cond: Ciphertext,
        if_true: Ciphertext,
        if_false: Ciphertext,
    ) -> Result<Ciphertext, FheError>;
}
