/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let mut bytes = [0; 8];
    for byte in &mut bytes {
        *byte = (256. * random()) as u8;
    }
    u64::from_be_bytes(bytes)
}
