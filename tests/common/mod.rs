//! Deterministic ZIP builder for tests.
//!
//! Produces Zip32 archives with explicit sizes, optional data descriptors
//! and comments. The encrypted flag is only a header bit; payloads are
//! stored or deflated, never encrypted.

#![allow(dead_code)]

use std::io::Write;

use flate2::Compression;
use flate2::write::DeflateEncoder;

pub struct Entry {
    pub name: &'static str,
    pub payload: Vec<u8>,
    pub deflate: bool,
    pub flags: u16,
    pub extra: Vec<u8>,
    pub comment: Vec<u8>,
    pub data_descriptor: bool,
}

impl Entry {
    pub fn stored(name: &'static str, payload: &[u8]) -> Self {
        Self {
            name,
            payload: payload.to_vec(),
            deflate: false,
            flags: 0,
            extra: Vec::new(),
            comment: Vec::new(),
            data_descriptor: false,
        }
    }

    pub fn deflated(name: &'static str, payload: &[u8]) -> Self {
        Self {
            deflate: true,
            ..Self::stored(name, payload)
        }
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn extra(mut self, extra: &[u8]) -> Self {
        self.extra = extra.to_vec();
        self
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub fn with_data_descriptor(mut self) -> Self {
        self.data_descriptor = true;
        self
    }
}

/// Offsets of the flag fields written for one entry.
pub struct Layout {
    pub lfh_flags: usize,
    pub cdfh_flags: usize,
}

/// Build archive bytes and the flag offsets of every entry.
pub fn build_zip(entries: &[Entry]) -> (Vec<u8>, Vec<Layout>) {
    let mut out = Vec::new();
    let mut cd = Vec::new();
    let mut cd_flags = Vec::new();
    let mut lfh_flags = Vec::new();

    for entry in entries {
        let method: u16 = if entry.deflate { 8 } else { 0 };
        let data = if entry.deflate {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&entry.payload).unwrap();
            encoder.finish().unwrap()
        } else {
            entry.payload.clone()
        };
        let flags = entry.flags | if entry.data_descriptor { 0x0008 } else { 0 };
        let name = entry.name.as_bytes();
        let local_offset = out.len() as u32;

        out.extend_from_slice(b"PK\x03\x04");
        out.extend_from_slice(&20u16.to_le_bytes());
        lfh_flags.push(out.len());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&method.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        out.extend_from_slice(&0x21u16.to_le_bytes()); // mod date
        out.extend_from_slice(&0u32.to_le_bytes()); // crc32
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(entry.payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&(entry.extra.len() as u16).to_le_bytes());
        out.extend_from_slice(name);
        out.extend_from_slice(&entry.extra);
        out.extend_from_slice(&data);

        if entry.data_descriptor {
            out.extend_from_slice(b"PK\x07\x08");
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
            out.extend_from_slice(&(entry.payload.len() as u32).to_le_bytes());
        }

        cd.extend_from_slice(b"PK\x01\x02");
        cd.extend_from_slice(&20u16.to_le_bytes()); // version made by
        cd.extend_from_slice(&20u16.to_le_bytes()); // version needed
        cd_flags.push(cd.len());
        cd.extend_from_slice(&flags.to_le_bytes());
        cd.extend_from_slice(&method.to_le_bytes());
        cd.extend_from_slice(&0u16.to_le_bytes());
        cd.extend_from_slice(&0x21u16.to_le_bytes());
        cd.extend_from_slice(&0u32.to_le_bytes());
        cd.extend_from_slice(&(data.len() as u32).to_le_bytes());
        cd.extend_from_slice(&(entry.payload.len() as u32).to_le_bytes());
        cd.extend_from_slice(&(name.len() as u16).to_le_bytes());
        cd.extend_from_slice(&(entry.extra.len() as u16).to_le_bytes());
        cd.extend_from_slice(&(entry.comment.len() as u16).to_le_bytes());
        cd.extend_from_slice(&0u16.to_le_bytes()); // disk number start
        cd.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
        cd.extend_from_slice(&0u32.to_le_bytes()); // external attributes
        cd.extend_from_slice(&local_offset.to_le_bytes());
        cd.extend_from_slice(name);
        cd.extend_from_slice(&entry.extra);
        cd.extend_from_slice(&entry.comment);
    }

    let cd_offset = out.len();
    out.extend_from_slice(&cd);

    out.extend_from_slice(b"PK\x05\x06");
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(cd.len() as u32).to_le_bytes());
    out.extend_from_slice(&(cd_offset as u32).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());

    let layouts = lfh_flags
        .into_iter()
        .zip(cd_flags)
        .map(|(lfh_flags, cd_flag)| Layout {
            lfh_flags,
            cdfh_flags: cd_offset + cd_flag,
        })
        .collect();

    (out, layouts)
}

pub fn read_flags(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

/// A small archive exercising names, extras, comments and a data descriptor.
pub fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::stored("readme.txt", b"This file is plain text and readable."),
        Entry::deflated("logs/app.log", &b"line of log output\n".repeat(40))
            .extra(b"\x55\x54\x05\x00\x01\x00\x00\x00\x00"),
        Entry::stored("empty/", b"").comment(b"a directory"),
        Entry::deflated("data.bin", &[0u8, 1, 2, 3, 250, 251, 252, 253].repeat(16))
            .flags(0x0800)
            .with_data_descriptor(),
    ]
}
