#![no_main]
use libfuzzer_sys::fuzz_target;

use chunkwise::blake2b::Blake2b512;

fuzz_target!(|data: &[u8]| {
    let expected = Blake2b512::hash_to_vec(data, None).ok();

    // first byte picks the chunk size
    let chunk = data.first().map_or(1, |&b| b as usize + 1);
    let mut hasher = match Blake2b512::new(None) {
        Ok(hasher) => hasher,
        Err(_) => return,
    };
    for piece in data.chunks(chunk) {
        if hasher.update(piece).is_err() {
            return;
        }
    }
    assert_eq!(hasher.finalize_to_vec().ok(), expected);
});
