#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;
use rankskip::{Options, SkipList};

fuzz_target!(|data: &[u8]| {
    let Some((&config, ops)) = data.split_first() else {
        return;
    };

    let options = Options::new()
        .with_probability(f64::from(config & 0x0f) / 15.0)
        .with_max_level(usize::from(config >> 4) + 1)
        .with_seed(u64::from(config));

    let mut list = SkipList::with_options(options).unwrap();
    let mut model = BTreeMap::new();

    for op in ops.chunks_exact(2) {
        let (kind, arg) = (op[0] % 4, op[1]);

        match kind {
            0 | 1 => assert_eq!(list.insert(arg, op[0]).unwrap(), model.insert(arg, op[0])),
            2 => assert_eq!(list.remove(&arg), model.remove(&arg)),
            _ => {
                let index = usize::from(arg);
                let expected = model.keys().nth(index).copied();
                let expected = expected.and_then(|key| model.remove_entry(&key));
                assert_eq!(list.remove_index(index), expected);
            }
        }

        assert_eq!(list.len(), model.len());
    }

    for (index, (key, val)) in model.iter().enumerate() {
        assert_eq!(list.get_index(index), Some((key, val)));
        assert_eq!(list.rank_of(key), Some(index));
    }
});
