//! Folder scan to listing to per-index request, the batch rendering loop.

use std::fs;
use std::path::PathBuf;

use pdbrender::batch::{self, IndexError, ScanOptions, SortKey, SortOrder};
use pdbrender::compile::{compile_request, DirectiveKind};
use pdbrender::options::RenderRequest;

#[test]
fn listing_drives_one_request_per_file() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["2abc.pdb", "1xyz.pdb", "3def.PDB", "readme.md"] {
        fs::write(dir.path().join(name), "END\n").unwrap();
    }
    let options = ScanOptions {
        pattern: "*.pdb".to_owned(),
        sort: SortKey::Name,
        order: SortOrder::Descending,
    };
    let files = batch::scan(dir.path().to_str().unwrap(), &options).unwrap();
    let listing = batch::format_listing(&files);
    let entries = batch::parse_listing(&listing);
    assert_eq!(entries.len(), 2);

    for (index, expected) in ["2abc.pdb", "1xyz.pdb"].iter().enumerate() {
        let selected = batch::select(&entries, index).unwrap();
        assert_eq!(selected.total_count, 2);
        assert!(selected.item.ends_with(expected));

        let request = RenderRequest {
            structure: selected.item.clone(),
            ..RenderRequest::default()
        };
        let out = PathBuf::from(format!("/tmp/batch-{index}.png"));
        let compilation = compile_request(&request, &out).unwrap();
        assert_eq!(compilation.directives.count(DirectiveKind::Render), 1);
        assert_eq!(compilation.directives.render_target(), Some(out.as_path()));
    }

    assert_eq!(
        batch::select(&entries, 2).unwrap_err(),
        IndexError {
            index: 2,
            total_count: 2,
        }
    );
}

#[test]
fn request_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requests/job.toml");
    let mut request = RenderRequest::default();
    request.preset = "custom".to_owned();
    request.lighting.fog = Some(0.25);
    request.labels.show = true;
    request.save(&path).unwrap();

    let loaded = RenderRequest::load(&path).unwrap();
    assert_eq!(loaded, request);
}
