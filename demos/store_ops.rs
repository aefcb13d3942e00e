// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

extern crate imabaseline;

use hex_literal::hex;
use imabaseline::baseline::{IRecordProvider, MemoRecordStore};
use imabaseline::digest::{Digest, DigestAlgorithm};

fn main() {
    let j: &str = r#"{
        "name": "rhel9-base",
        "kind": "simple",
        "records": [
            {
                "type": "whitelist",
                "path": "/usr/bin/gradle",
                "hash": "SHA256 aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
            }
        ]
    }"#;

    let s = MemoRecordStore::new();

    let b = s.load_json(j).unwrap();
    let rp = s.provider(&b);

    println!("{:#?}", rp.find_by_path("gradle", true));

    let d = Digest::new(
        DigestAlgorithm::Sha256,
        &hex!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
    )
    .unwrap();

    println!("{:#?}", rp.find_by_hash(&d));
}
