#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;

pub enum Member<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
}

fn append<W: Write>(
    builder: &mut tar::Builder<W>,
    members: &[Member<'_>],
    new_header: fn() -> tar::Header,
) {
    for member in members {
        let mut header = new_header();
        match member {
            Member::File(name, data) => {
                header.set_entry_type(tar::EntryType::Regular);
                header.set_size(data.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                builder.append_data(&mut header, name, *data).unwrap();
            }
            Member::Dir(name) => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder.append_data(&mut header, name, std::io::empty()).unwrap();
            }
        }
    }
}

fn tar_bytes(members: &[Member<'_>], header: fn() -> tar::Header) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    append(&mut builder, members, header);
    builder.into_inner().unwrap()
}

/// Writes a gzip-compressed IG pack into `dir`.
pub fn write_tgz(dir: &Path, members: &[Member<'_>]) -> PathBuf {
    let path = dir.join("package.tgz");
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), flate2::Compression::default());
    encoder.write_all(&tar_bytes(members, tar::Header::new_gnu)).unwrap();
    encoder.finish().unwrap();
    path
}

/// Writes a bzip2-compressed IG pack into `dir`.
pub fn write_tbz2(dir: &Path, members: &[Member<'_>]) -> PathBuf {
    let path = dir.join("package.tbz2");
    let mut encoder =
        bzip2::write::BzEncoder::new(File::create(&path).unwrap(), bzip2::Compression::default());
    encoder.write_all(&tar_bytes(members, tar::Header::new_gnu)).unwrap();
    encoder.finish().unwrap();
    path
}

/// Writes an xz-compressed IG pack into `dir`.
pub fn write_txz(dir: &Path, members: &[Member<'_>]) -> PathBuf {
    let path = dir.join("package.txz");
    let mut encoder = xz2::write::XzEncoder::new(File::create(&path).unwrap(), 6);
    encoder.write_all(&tar_bytes(members, tar::Header::new_gnu)).unwrap();
    encoder.finish().unwrap();
    path
}

/// Writes an uncompressed IG pack into `dir`.
pub fn write_tar(dir: &Path, members: &[Member<'_>]) -> PathBuf {
    let path = dir.join("package.tar");
    std::fs::write(&path, tar_bytes(members, tar::Header::new_gnu)).unwrap();
    path
}

/// Writes an uncompressed pre-POSIX (v7) tar, which has no `ustar` magic.
pub fn write_v7_tar(dir: &Path, members: &[Member<'_>]) -> PathBuf {
    let path = dir.join("package-v7.tar");
    std::fs::write(&path, tar_bytes(members, tar::Header::new_old)).unwrap();
    path
}
