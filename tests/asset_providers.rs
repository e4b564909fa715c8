use pdf_font_fallback::fonts::liberation;
use pdf_font_fallback::{AssetLocations, AssetProvider, DirectoryProvider, MemoryProvider};

#[tokio::test]
async fn directory_provider_reads_assets_next_to_each_other() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("SomeFace.ttf"), b"ttf-bytes").unwrap();
    std::fs::write(
        dir.path().join("SomeFace_CidToGIDMap.bin"),
        [0x00, 0x01, 0x00, 0x02],
    )
    .unwrap();

    let provider = DirectoryProvider::new(AssetLocations {
        font_dir: dir.path().to_path_buf(),
        glyph_map_dir: None,
    });

    assert_eq!(
        provider.fetch_font_program("SomeFace").await,
        Some(b"ttf-bytes".to_vec())
    );
    assert_eq!(
        provider.fetch_glyph_index_mapping("SomeFace").await,
        Some(vec![0x00, 0x01, 0x00, 0x02])
    );
}

#[tokio::test]
async fn directory_provider_honors_a_split_map_directory() {
    let fonts = tempfile::tempdir().expect("tempdir");
    let maps = tempfile::tempdir().expect("tempdir");
    std::fs::write(fonts.path().join("SomeFace.ttf"), b"ttf-bytes").unwrap();
    std::fs::write(maps.path().join("SomeFace_CidToGIDMap.bin"), [9, 9]).unwrap();

    let provider = DirectoryProvider::new(AssetLocations {
        font_dir: fonts.path().to_path_buf(),
        glyph_map_dir: Some(maps.path().to_path_buf()),
    });

    assert!(provider.fetch_font_program("SomeFace").await.is_some());
    assert_eq!(
        provider.fetch_glyph_index_mapping("SomeFace").await,
        Some(vec![9, 9])
    );
}

#[tokio::test]
async fn missing_files_resolve_to_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = DirectoryProvider::new(AssetLocations {
        font_dir: dir.path().to_path_buf(),
        glyph_map_dir: None,
    });

    assert_eq!(provider.fetch_font_program("NoSuchFace").await, None);
    assert_eq!(provider.fetch_glyph_index_mapping("NoSuchFace").await, None);
}

#[tokio::test]
async fn memory_provider_only_serves_its_own_face() {
    let provider = MemoryProvider::new("OnlyFace", vec![1, 2], vec![3, 4]);

    assert_eq!(
        provider.fetch_font_program("OnlyFace").await,
        Some(vec![1, 2])
    );
    assert_eq!(
        provider.fetch_glyph_index_mapping("OnlyFace").await,
        Some(vec![3, 4])
    );
    assert_eq!(provider.fetch_font_program("OtherFace").await, None);
    assert_eq!(provider.fetch_glyph_index_mapping("OtherFace").await, None);
}

#[test]
fn static_lookups_default_to_the_bundled_face() {
    let provider = MemoryProvider::new(liberation::FACE_NAME, Vec::new(), Vec::new());

    let metrics = provider.face_metrics(liberation::FACE_NAME).unwrap();
    assert_eq!(metrics, liberation::METRICS);
    assert_eq!(
        provider.unicode_map(liberation::FACE_NAME),
        Some(liberation::TO_UNICODE_CMAP.as_bytes().to_vec())
    );
    let widths = provider.glyph_widths(liberation::FACE_NAME).unwrap();
    assert_eq!(widths.default_width, liberation::DEFAULT_WIDTH);
    assert!(!widths.runs.is_empty());

    assert!(provider.face_metrics("UnknownFace").is_none());
    assert!(provider.unicode_map("UnknownFace").is_none());
    assert!(provider.glyph_widths("UnknownFace").is_none());
}

#[test]
fn asset_locations_deserialize_camel_case() {
    let locations: AssetLocations =
        serde_json::from_str(r#"{"fontDir": "fonts", "glyphMapDir": "maps"}"#).unwrap();
    assert_eq!(locations.font_dir.to_str(), Some("fonts"));
    assert_eq!(
        locations.glyph_map_dir.as_deref().and_then(|p| p.to_str()),
        Some("maps")
    );

    let locations: AssetLocations = serde_json::from_str(r#"{"fontDir": "fonts"}"#).unwrap();
    assert!(locations.glyph_map_dir.is_none());
}
