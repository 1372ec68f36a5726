pub const BLAKE2S_BLOCKBYTES: usize = 64;
pub const BLAKE2S_OUTBYTES: usize = 32;
pub const BLAKE2S_KEYBYTES: usize = 32;
pub const BLAKE2S_SALTBYTES: usize = 8;
pub const BLAKE2S_PERSONALBYTES: usize = 8;

pub const BLAKE2B_BLOCKBYTES: usize = 128;
pub const BLAKE2B_OUTBYTES: usize = 64;
pub const BLAKE2B_KEYBYTES: usize = 64;
pub const BLAKE2B_SALTBYTES: usize = 16;
pub const BLAKE2B_PERSONALBYTES: usize = 16;

pub const CRYPTO_ONETIMEAUTH_POLY1305_BYTES: usize = 16;
pub const CRYPTO_ONETIMEAUTH_POLY1305_KEYBYTES: usize = 32;
pub const CRYPTO_ONETIMEAUTH_BYTES: usize = CRYPTO_ONETIMEAUTH_POLY1305_BYTES;
pub const CRYPTO_ONETIMEAUTH_KEYBYTES: usize = CRYPTO_ONETIMEAUTH_POLY1305_KEYBYTES;

pub const GHASH_BLOCKBYTES: usize = 16;

pub const CRYPTO_AEAD_AES256GCM_KEYBYTES: usize = 32;
pub const CRYPTO_AEAD_AES256GCM_NPUBBYTES: usize = 12;
pub const CRYPTO_AEAD_AES256GCM_ABYTES: usize = 16;
/// Largest plaintext accepted by AES-GCM, 2^36 - 32 bytes.
pub const CRYPTO_AEAD_AES256GCM_MESSAGEBYTES_MAX: u64 = (1 << 36) - 32;
/// Largest associated data accepted by AES-GCM, 2^61 - 1 bytes.
pub const CRYPTO_AEAD_AES256GCM_ADBYTES_MAX: u64 = (1 << 61) - 1;
