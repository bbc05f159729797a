use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fsutil::{delete, dir_size, subdirectories};

#[derive(Debug, Default)]
pub struct MirrorStats {
    pub copied: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub failed: Vec<(PathBuf, String)>,
}

/// Backup pass: replicate every album under `dest_root`, mapping each album
/// to its path relative to `source_root`. An album whose destination copy
/// already has the same aggregate size is left alone; a size mismatch means
/// the destination is stale and gets replaced wholesale.
///
/// The size check and the copy are not atomic. Another process touching
/// either tree in between can break the copy; single-operator use only.
pub fn mirror(source_root: &Path, dest_root: &Path, dry_run: bool) -> Result<MirrorStats> {
    let mut stats = MirrorStats::default();

    for band in subdirectories(source_root)? {
        for album in subdirectories(&band)? {
            if let Err(err) = mirror_album(source_root, dest_root, &album, dry_run, &mut stats) {
                eprintln!("{} {}: {}", "failed to mirror".red(), album.display(), err);
                stats.failed.push((album.clone(), err.to_string()));
            }
        }
    }

    return Ok(stats);
}

fn mirror_album(
    source_root: &Path,
    dest_root: &Path,
    album: &Path,
    dry_run: bool,
    stats: &mut MirrorStats,
) -> Result<()> {
    let relative = album.strip_prefix(source_root)?;
    let destination = dest_root.join(relative);

    if destination.exists() {
        if dir_size(album)? == dir_size(&destination)? {
            stats.skipped += 1;
            return Ok(());
        }
        if dry_run {
            println!("would replace {}", relative.display());
            stats.replaced += 1;
            return Ok(());
        }
        println!("{} {}", "replacing".yellow(), relative.display());
        // if this silent delete fails, copy_tree errors out on the leftover
        delete(&destination, true);
        copy_tree(album, &destination)?;
        stats.replaced += 1;
    } else {
        if dry_run {
            println!("would copy {}", relative.display());
            stats.copied += 1;
            return Ok(());
        }
        println!("{} {}", "copying".green(), relative.display());
        copy_tree(album, &destination)?;
        stats.copied += 1;
    }

    return Ok(());
}

/// Recursive structure-preserving copy. The top-level `create_dir` is
/// deliberate: the destination must not exist when the copy starts.
/// Symlinks are skipped, matching their exclusion from `dir_size`; copying
/// them through would make the destination count more bytes than the
/// source and defeat the size-equality skip on every later run.
fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir(destination)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            continue;
        }
        let target = destination.join(entry.file_name());
        if file_type.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(path: &Path, bytes: usize) {
        let mut file = File::create(path).unwrap();
        file.write_all(&vec![1u8; bytes]).unwrap();
    }

    fn library_with_album() -> (tempfile::TempDir, tempfile::TempDir, PathBuf) {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let album = source.path().join("BandX/Album1");
        fs::create_dir_all(album.join("Disc 1")).unwrap();
        write_file(&album.join("Disc 1/01.flac"), 100);
        write_file(&album.join("02.flac"), 40);
        (source, dest, album)
    }

    #[test]
    fn fresh_copy_matches_source_size() {
        let (source, dest, album) = library_with_album();

        let stats = mirror(source.path(), dest.path(), false).unwrap();
        assert_eq!(stats.copied, 1);

        let mirrored = dest.path().join("BandX/Album1");
        assert_eq!(
            dir_size(&mirrored).unwrap(),
            dir_size(&album).unwrap()
        );
        assert!(mirrored.join("Disc 1/01.flac").exists());
    }

    #[test]
    fn second_run_skips_without_copying() {
        let (source, dest, _album) = library_with_album();

        mirror(source.path(), dest.path(), false).unwrap();
        let stats = mirror(source.path(), dest.path(), false).unwrap();

        assert_eq!(stats.copied, 0);
        assert_eq!(stats.replaced, 0);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn stale_destination_is_replaced_wholesale() {
        let (source, dest, album) = library_with_album();

        // a previous partial mirror: right path, wrong content
        let stale = dest.path().join("BandX/Album1");
        fs::create_dir_all(&stale).unwrap();
        write_file(&stale.join("leftover.part"), 7);

        let stats = mirror(source.path(), dest.path(), false).unwrap();
        assert_eq!(stats.replaced, 1);
        assert!(!stale.join("leftover.part").exists());
        assert_eq!(dir_size(&stale).unwrap(), dir_size(&album).unwrap());
    }

    #[test]
    fn empty_album_still_gets_a_destination() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::create_dir_all(source.path().join("BandX/Empty")).unwrap();

        let stats = mirror(source.path(), dest.path(), false).unwrap();
        assert_eq!(stats.copied, 1);
        assert!(dest.path().join("BandX/Empty").is_dir());
    }

    #[test]
    fn one_failed_album_does_not_stop_the_rest() {
        let (source, dest, _album) = library_with_album();
        let other = source.path().join("BandY/Album2");
        fs::create_dir_all(&other).unwrap();
        write_file(&other.join("01.flac"), 10);

        // make BandY uncreatable on the destination side
        write_file(&dest.path().join("BandY"), 1);

        let stats = mirror(source.path(), dest.path(), false).unwrap();
        assert_eq!(stats.copied, 1);
        assert_eq!(stats.failed.len(), 1);
        assert_eq!(stats.failed[0].0, other);
        assert!(dest.path().join("BandX/Album1").is_dir());
    }

    #[test]
    #[cfg(unix)]
    fn symlinks_are_skipped_and_do_not_break_idempotence() {
        let (source, dest, album) = library_with_album();
        std::os::unix::fs::symlink(album.join("02.flac"), album.join("link.flac")).unwrap();
        std::os::unix::fs::symlink(album.join("Disc 1"), album.join("Disc 1 link")).unwrap();

        let first = mirror(source.path(), dest.path(), false).unwrap();
        assert_eq!(first.copied, 1);
        assert!(first.failed.is_empty());

        let mirrored = dest.path().join("BandX/Album1");
        assert!(!mirrored.join("link.flac").exists());
        assert!(!mirrored.join("Disc 1 link").exists());
        assert_eq!(dir_size(&mirrored).unwrap(), dir_size(&album).unwrap());

        // an unchanged source must keep hitting the size-equality skip
        let second = mirror(source.path(), dest.path(), false).unwrap();
        assert_eq!(second.replaced, 0);
        assert_eq!(second.skipped, 1);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let (source, dest, _album) = library_with_album();

        let stats = mirror(source.path(), dest.path(), true).unwrap();
        assert_eq!(stats.copied, 1);
        assert!(!dest.path().join("BandX").exists());
    }
}
