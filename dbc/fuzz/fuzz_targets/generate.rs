#![no_main]

use canconv_dbc::prelude::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(network) = serde_json::from_slice::<Network>(data) else {
        return;
    };

    let generator = Generator::new();
    if let Ok(first) = generator.render(&network) {
        // Anything that validates must render identically every time
        assert_eq!(generator.render(&network).ok(), Some(first));
    }
});
