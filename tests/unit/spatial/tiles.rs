//! Tests for tile construction and library ordering

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use tilemosaic::algorithm::pool::TileId;
    use tilemosaic::analysis::signature::ColorValue;
    use tilemosaic::spatial::tiles::{Tile, TileLibrary};

    // Tests the library keeps input order and caches signatures
    // Verified by sorting tiles by signature
    #[test]
    fn test_library_order_and_signatures() {
        let images = vec![
            ("b.png".to_string(), RgbImage::from_pixel(4, 4, Rgb([200, 0, 0]))),
            ("a.png".to_string(), RgbImage::from_pixel(4, 4, Rgb([0, 0, 9]))),
        ];

        let library = TileLibrary::from_images(images, 4);

        assert_eq!(library.len(), 2);
        assert_eq!(library.tile_size(), 4);
        assert_eq!(library.get(TileId(0)).unwrap().name(), "b.png");
        assert_eq!(
            library.get(TileId(1)).unwrap().signature(),
            ColorValue::new(0.0, 0.0, 9.0)
        );
        assert!(library.get(TileId(2)).is_none());

        let signatures: Vec<_> = library.signatures().collect();
        assert_eq!(
            signatures,
            vec![
                (TileId(0), ColorValue::new(200.0, 0.0, 0.0)),
                (TileId(1), ColorValue::new(0.0, 0.0, 9.0)),
            ]
        );
    }

    // Tests tiles of the wrong size are resized to the tile size
    // Verified by keeping the decoded dimensions
    #[test]
    fn test_mismatched_tile_resized() {
        let pixels = RgbImage::from_pixel(32, 20, Rgb([60, 70, 80]));
        let tile = Tile::new("big.png".to_string(), pixels, 8);

        assert_eq!(tile.pixels().dimensions(), (8, 8));
        let signature = tile.signature();
        assert!((signature.r - 60.0).abs() < 1.0);
        assert!((signature.g - 70.0).abs() < 1.0);
        assert!((signature.b - 80.0).abs() < 1.0);
    }

    // Tests an empty library
    // Verified by inserting a placeholder tile
    #[test]
    fn test_empty_library() {
        let library = TileLibrary::from_images(Vec::new(), 16);

        assert!(library.is_empty());
        assert!(library.tiles().is_empty());
        assert_eq!(library.signatures().count(), 0);
    }
}
