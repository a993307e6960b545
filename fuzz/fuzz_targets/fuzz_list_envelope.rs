#![no_main]

use libfuzzer_sys::fuzz_target;
use scm_codec::core::types::{names, TypeInfo};
use scm_codec::registry::CodecRegistry;

fuzz_target!(|data: &[u8]| {
    let Ok(registry) = CodecRegistry::with_defaults() else {
        return;
    };

    // Generic list entry: tag picks the element codec
    let _ = registry.decode(data, &TypeInfo::leaf(names::LIST));

    // Every typed list codec must reject or accept without panicking
    for element in registry.list_element_types() {
        if let Ok(codec) = registry.list_codec(element) {
            let _ = codec.decode_items(data);
        }
    }
});
