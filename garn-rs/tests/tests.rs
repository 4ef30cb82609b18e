#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use garn_rs::collision::SpatialIndex;
    use garn_rs::entities::{Fabric, Placement};
    use garn_rs::geometry::boolean::{intersection_area, overlaps, union_area};
    use garn_rs::geometry::geo_traits::Shape;
    use garn_rs::geometry::primitives::{Point, Rect, SPolygon};
    use garn_rs::io::ext_repr::{
        ExtConfig, ExtFabric, ExtGarment, ExtGarmentPiece, ExtOutline, ExtPiece,
    };
    use garn_rs::io::{export, import};

    fn square(side: f64, x_min: f64, y_min: f64) -> SPolygon {
        SPolygon::new(vec![
            Point(x_min, y_min),
            Point(x_min + side, y_min),
            Point(x_min + side, y_min + side),
            Point(x_min, y_min + side),
        ])
        .unwrap()
    }

    fn ext_config(num_pieces: usize, pieces: Vec<ExtPiece>) -> ExtConfig {
        ExtConfig {
            fabric_width: 100.0,
            fabric_height: 100.0,
            num_pieces,
            pieces,
        }
    }

    fn ext_square(name: &str) -> ExtPiece {
        ExtPiece {
            name: name.to_string(),
            x: vec![0.0, 10.0, 10.0, 0.0],
            y: vec![0.0, 0.0, 10.0, 10.0],
            allow_rotation: true,
        }
    }

    #[test]
    fn polygon_area_and_centroid() {
        let sq = square(10.0, 5.0, 5.0);
        assert!(approx_eq!(f64, sq.area, 100.0, epsilon = 1e-9));
        let centroid = sq.centroid();
        assert!(approx_eq!(f64, centroid.x(), 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, centroid.y(), 10.0, epsilon = 1e-9));
    }

    #[test]
    fn polygon_orientation_is_normalized() {
        //clockwise input ends up with the same positive area
        let cw = SPolygon::new(vec![
            Point(0.0, 0.0),
            Point(0.0, 10.0),
            Point(10.0, 10.0),
            Point(10.0, 0.0),
        ])
        .unwrap();
        assert!(approx_eq!(f64, cw.area, 100.0, epsilon = 1e-9));
    }

    #[test]
    fn degenerate_polygons_are_rejected() {
        assert!(SPolygon::new(vec![Point(0.0, 0.0), Point(1.0, 0.0)]).is_err());
        //collinear points span no area
        let collinear = vec![Point(0.0, 0.0), Point(1.0, 1.0), Point(2.0, 2.0)];
        assert!(SPolygon::new(collinear).is_err());
    }

    #[test_case(90.0; "quarter turn")]
    #[test_case(180.0; "half turn")]
    #[test_case(270.0; "three quarter turn")]
    fn rotation_about_centroid_preserves_area(rotation: f64) {
        let triangle = SPolygon::new(vec![
            Point(0.0, 0.0),
            Point(8.0, 0.0),
            Point(2.0, 5.0),
        ])
        .unwrap();
        let placed = Placement::new(13.0, 7.0, rotation).apply(&triangle);
        let recomputed = SPolygon::calculate_area(&placed.points);
        assert!(approx_eq!(f64, recomputed, triangle.area, epsilon = 1e-9));
    }

    #[test]
    fn placement_moves_centroid_by_its_offset() {
        let sq = square(10.0, 0.0, 0.0);
        let placed = Placement::new(3.0, -2.0, 90.0).apply(&sq);
        let centroid = placed.centroid();
        assert!(approx_eq!(f64, centroid.x(), 5.0 + 3.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, centroid.y(), 5.0 - 2.0, epsilon = 1e-9));
    }

    #[test]
    fn touching_polygons_do_not_overlap() {
        let a = square(10.0, 0.0, 0.0);
        let b = square(10.0, 10.0, 0.0);
        assert!(!overlaps(&a, &b));
        assert!(approx_eq!(f64, intersection_area(&a, &b), 0.0, epsilon = 1e-9));
    }

    #[test]
    fn overlapping_polygons_have_positive_intersection() {
        let a = square(10.0, 0.0, 0.0);
        let b = square(10.0, 5.0, 0.0);
        assert!(overlaps(&a, &b));
        assert!(approx_eq!(f64, intersection_area(&a, &b), 50.0, epsilon = 1e-6));
    }

    #[test]
    fn union_area_of_disjoint_polygons_sums() {
        let polys = vec![square(10.0, 0.0, 0.0), square(5.0, 20.0, 20.0)];
        assert!(approx_eq!(f64, union_area(&polys), 125.0, epsilon = 1e-6));
    }

    #[test]
    fn union_area_counts_shared_region_once() {
        let polys = vec![square(10.0, 0.0, 0.0), square(10.0, 5.0, 0.0)];
        assert!(approx_eq!(f64, union_area(&polys), 150.0, epsilon = 1e-6));
    }

    #[test]
    fn fabric_contains_its_interior_only() {
        let fabric = Fabric::new(30.0, 10.0).unwrap();
        assert!(fabric.contains(&Rect::try_new(0.0, 0.0, 10.0, 10.0).unwrap()));
        assert!(!fabric.contains(&Rect::try_new(-0.5, 0.0, 9.5, 10.0).unwrap()));
        assert!(!fabric.contains(&Rect::try_new(25.0, 0.0, 31.0, 10.0).unwrap()));
    }

    #[test]
    fn invalid_fabric_is_rejected() {
        assert!(Fabric::new(0.0, 10.0).is_err());
        assert!(Fabric::new(10.0, -5.0).is_err());
    }

    #[test]
    fn spatial_index_returns_bbox_intersections() {
        let polys = [
            square(10.0, 0.0, 0.0),
            square(10.0, 50.0, 50.0),
            square(10.0, 5.0, 5.0),
        ];
        let index = SpatialIndex::build(polys.iter().enumerate().map(|(i, p)| (i, p.bbox)));
        assert_eq!(index.len(), 3);

        let mut hits: Vec<usize> = index.query(&polys[0].bbox).collect();
        hits.sort();
        assert_eq!(hits, vec![0, 2]);

        let far: Vec<usize> = index
            .query(&Rect::try_new(80.0, 80.0, 90.0, 90.0).unwrap())
            .collect();
        assert!(far.is_empty());
    }

    #[test]
    fn expansion_names_and_replicates_base_pieces() {
        let config = ext_config(3, vec![ext_square("A")]);
        let instance = import::import(&config).unwrap();

        let names: Vec<&str> = instance.pieces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A_copy1", "A_copy2", "A_copy3"]);
        for piece in &instance.pieces {
            assert_eq!(piece.shape.points, instance.pieces[0].shape.points);
        }
    }

    #[test]
    fn expansion_preserves_insertion_order() {
        let config = ext_config(2, vec![ext_square("A"), ext_square("B")]);
        let instance = import::import(&config).unwrap();
        let names: Vec<&str> = instance.pieces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A_copy1", "A_copy2", "B_copy1", "B_copy2"]);
        assert_eq!(
            instance.pieces.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn rotation_flag_maps_to_rotation_set() {
        let mut fixed = ext_square("F");
        fixed.allow_rotation = false;
        let config = ext_config(1, vec![ext_square("R"), fixed]);
        let instance = import::import(&config).unwrap();
        assert_eq!(instance.pieces[0].rotations, vec![0.0, 90.0, 180.0, 270.0]);
        assert_eq!(instance.pieces[1].rotations, vec![0.0]);
    }

    #[test]
    fn mismatched_coordinate_arrays_fail_fast() {
        let mut piece = ext_square("BAD");
        piece.y.pop();
        let result = import::import(&ext_config(1, vec![piece]));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("x/y length mismatch"), "{message}");
    }

    #[test_case(0.0, 100.0; "zero width")]
    #[test_case(100.0, -1.0; "negative height")]
    fn invalid_fabric_dimensions_fail_fast(width: f64, height: f64) {
        let config = ExtConfig {
            fabric_width: width,
            fabric_height: height,
            num_pieces: 1,
            pieces: vec![ext_square("A")],
        };
        assert!(import::import(&config).is_err());
    }

    #[test]
    fn zero_copies_fail_fast() {
        let result = import::import(&ext_config(0, vec![ext_square("A")]));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("num_pieces"), "{message}");
    }

    #[test]
    fn too_short_outline_fails_fast() {
        let piece = ExtPiece {
            name: "LINE".to_string(),
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.0],
            allow_rotation: true,
        };
        assert!(import::import(&ext_config(1, vec![piece])).is_err());
    }

    #[test]
    fn garment_schema_expands_quantities() {
        let garment = ExtGarment {
            fabric: ExtFabric {
                width: 100.0,
                height: 150.0,
            },
            pieces: vec![
                ExtGarmentPiece {
                    piece_id: "FRONT".to_string(),
                    qty: 2,
                    outline: ExtOutline {
                        points: vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
                    },
                },
                ExtGarmentPiece {
                    piece_id: "BACK".to_string(),
                    qty: 1,
                    outline: ExtOutline {
                        points: vec![(0.0, 0.0), (8.0, 0.0), (8.0, 8.0), (0.0, 8.0)],
                    },
                },
            ],
        };
        let config = import::garment_to_config(&garment).unwrap();

        assert_eq!(config.num_pieces, 1);
        let names: Vec<&str> = config.pieces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["FRONT_1", "FRONT_2", "BACK"]);
        assert_eq!(config.pieces[0].x, vec![0.0, 10.0, 10.0, 0.0]);
        assert_eq!(config.pieces[0].y, vec![0.0, 0.0, 10.0, 10.0]);

        //the converted configuration imports cleanly
        assert!(import::import(&config).is_ok());
    }

    #[test]
    fn garment_without_outline_points_is_rejected() {
        let garment = ExtGarment {
            fabric: ExtFabric {
                width: 100.0,
                height: 150.0,
            },
            pieces: vec![ExtGarmentPiece {
                piece_id: "EMPTY".to_string(),
                qty: 1,
                outline: ExtOutline { points: vec![] },
            }],
        };
        assert!(import::garment_to_config(&garment).is_err());
    }

    #[test]
    fn configuration_artifact_round_trips_through_disk() {
        let config = ext_config(2, vec![ext_square("A")]);
        let path = std::env::temp_dir().join("garn_rs_config_test.json");

        import::write_config(&config, &path).unwrap();
        let reread = import::read_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(reread.num_pieces, 2);
        assert_eq!(reread.pieces.len(), 1);
        assert_eq!(reread.pieces[0].name, "A");
        assert_eq!(reread.pieces[0].x, config.pieces[0].x);
    }

    #[test]
    fn export_round_trip_matches_source_polygon() {
        let polys = vec![square(10.0, 0.0, 0.0)];
        let exported = export::to_ext_placed(&polys);
        assert!(export::round_trip_check(&polys, &exported).is_ok());
    }

    #[test]
    fn corrupted_export_fails_consistency_check() {
        let polys = vec![square(10.0, 0.0, 0.0)];
        let mut exported = export::to_ext_placed(&polys);
        exported[0].coordinates[1].x += 0.5;

        let result = export::round_trip_check(&polys, &exported);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("export consistency check failed"), "{message}");
    }

    #[test]
    fn export_writes_and_verifies_files() {
        let polys = vec![square(10.0, 0.0, 0.0), square(5.0, 20.0, 0.0)];
        let dir = std::env::temp_dir();
        let csv_path = dir.join("garn_rs_export_test.csv");
        let json_path = dir.join("garn_rs_export_test.json");

        let exported = export::export_pieces(&polys, &csv_path, &json_path).unwrap();
        assert_eq!(exported.len(), 2);

        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("piece_id,x,y"));
        assert_eq!(csv.lines().count(), 1 + 4 + 4);

        std::fs::remove_file(csv_path).unwrap();
        std::fs::remove_file(json_path).unwrap();
    }
}
