#![no_main]

use libfuzzer_sys::fuzz_target;
use bufrelay::BufferedRelay;

// Input layout: repeated [flags, len, bytes...]. Bit 0 of `flags` toggles
// writability, bit 1 writes as lossy text instead of bytes.
fuzz_target!(|data: &[u8]| {
    let mut relay = BufferedRelay::default();
    let mut expected_main = Vec::new();
    let mut expected_cache = Vec::new();

    let mut rest = data;
    while let [flags, len, tail @ ..] = rest {
        let take = (*len as usize).min(tail.len());
        let (chunk, next) = tail.split_at(take);
        rest = next;

        let writable = flags & 1 == 0;
        relay.set_writable(writable);

        let bytes = if flags & 2 != 0 {
            let text = String::from_utf8_lossy(chunk).into_owned();
            let bytes = text.as_bytes().to_vec();
            relay.write(text);
            bytes
        } else {
            relay.write(chunk);
            chunk.to_vec()
        };

        // Verify: each write lands in exactly one buffer
        if writable {
            expected_main.extend_from_slice(&bytes);
        } else {
            expected_cache.extend_from_slice(&bytes);
        }
    }

    assert_eq!(&relay.body()[..], &expected_main[..]);
    assert_eq!(&relay.paused_cache()[..], &expected_cache[..]);

    // Verify: out leaves the buffer empty
    relay.out();
    assert!(relay.body().is_empty());
    assert!(relay.paused_cache().is_empty());
});
