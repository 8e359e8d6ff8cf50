#[cfg(test)]
mod tests {
    use crate::Error;
    use crate::cluster::Point;
    use crate::input::{InputFormat, read_csv_points, read_json_points, read_points_from, validate_point};
    use std::path::Path;

    fn malformed_record(err: Error) -> usize {
        match err {
            Error::MalformedInput { record, .. } => record,
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    #[test]
    fn test_csv_with_header() {
        let csv = "latitude,longitude
40.7128,-74.0060
40.7130, -74.0062
";
        let points = read_csv_points(csv.as_bytes()).unwrap();
        assert_eq!(points, vec![Point::new(40.7128, -74.006), Point::new(40.713, -74.0062)]);
    }

    #[test]
    fn test_csv_without_header() {
        let csv = "40.7128,-74.0060\n41.0,-74.0\n";
        let points = read_csv_points(csv.as_bytes()).unwrap();
        assert_eq!(points, vec![Point::new(40.7128, -74.006), Point::new(41.0, -74.0)]);
    }

    #[test]
    fn test_csv_columns_by_name() {
        let csv = "id,Lon,note,LAT
1,78.96,high waves,20.59
2,80.27,,13.08
";
        let points = read_csv_points(csv.as_bytes()).unwrap();
        assert_eq!(points, vec![Point::new(20.59, 78.96), Point::new(13.08, 80.27)]);
    }

    #[test]
    fn test_csv_unknown_header_falls_back_to_first_columns() {
        let csv = "y,x\n1.5,2.5\n";
        assert_eq!(read_csv_points(csv.as_bytes()).unwrap(), vec![Point::new(1.5, 2.5)]);
    }

    #[test]
    fn test_csv_header_only() {
        assert!(read_csv_points("latitude,longitude\n".as_bytes()).unwrap().is_empty());
        assert!(read_csv_points("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_csv_rejects_malformed_records() {
        let missing = "latitude,longitude\n1.0,2.0\n3.0\n";
        assert_eq!(malformed_record(read_csv_points(missing.as_bytes()).unwrap_err()), 3);

        let garbage = "1.0,2.0\n3.0,east\n";
        assert_eq!(malformed_record(read_csv_points(garbage.as_bytes()).unwrap_err()), 2);

        let empty = "latitude,longitude\n,2.0\n";
        assert_eq!(malformed_record(read_csv_points(empty.as_bytes()).unwrap_err()), 2);
    }

    #[test]
    fn test_csv_first_row_with_missing_field_is_data() {
        let csv = ",10.0\n1.0,2.0\n3.0,4.0\n";
        assert_eq!(malformed_record(read_csv_points(csv.as_bytes()).unwrap_err()), 1);

        let csv = "1.0,\n3.0,4.0\n";
        assert_eq!(malformed_record(read_csv_points(csv.as_bytes()).unwrap_err()), 1);
    }

    #[test]
    fn test_csv_rejects_out_of_range() {
        let csv = "latitude,longitude\n10.0,20.0\n95.0,20.0\n";
        assert_eq!(malformed_record(read_csv_points(csv.as_bytes()).unwrap_err()), 3);

        let csv = "10.0,181.0\n";
        assert_eq!(malformed_record(read_csv_points(csv.as_bytes()).unwrap_err()), 1);
    }

    #[test]
    fn test_json_request() {
        let json = r#"{"points": [
            {"longitude": 78.9629, "latitude": 20.5937},
            {"longitude": -179.99, "latitude": -17.0}
        ]}"#;
        let points = read_json_points(json.as_bytes()).unwrap();
        assert_eq!(points, vec![Point::new(20.5937, 78.9629), Point::new(-17.0, -179.99)]);
    }

    #[test]
    fn test_json_rejects_missing_coordinate() {
        let json = r#"{"points": [{"longitude": 1.0, "latitude": 2.0}, {"longitude": 1.0}]}"#;
        assert_eq!(malformed_record(read_json_points(json.as_bytes()).unwrap_err()), 2);

        let json = r#"{"points": [{"longitude": null, "latitude": 2.0}]}"#;
        assert_eq!(malformed_record(read_json_points(json.as_bytes()).unwrap_err()), 1);
    }

    #[test]
    fn test_json_rejects_out_of_range_and_bad_body() {
        let json = r#"{"points": [{"longitude": 200.0, "latitude": 2.0}]}"#;
        assert_eq!(malformed_record(read_json_points(json.as_bytes()).unwrap_err()), 1);

        assert!(matches!(read_json_points("[1, 2]".as_bytes()), Err(Error::Json(_))));
    }

    #[test]
    fn test_validate_point() {
        assert_eq!(validate_point(1, 90.0, -180.0).unwrap(), Point::new(90.0, -180.0));
        assert!(validate_point(1, -90.1, 0.0).is_err());
        assert!(validate_point(1, f64::NAN, 0.0).is_err());
        assert!(validate_point(1, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("reports.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("reports.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("reports.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("-")), InputFormat::Csv);
    }

    #[test]
    fn test_read_points_from_dispatches_on_format() {
        let json = r#"{"points": []}"#;
        assert!(read_points_from(json.as_bytes(), InputFormat::Json).unwrap().is_empty());

        let csv = "1.0,2.0\n";
        assert_eq!(read_points_from(csv.as_bytes(), InputFormat::Csv).unwrap(), vec![Point::new(1.0, 2.0)]);
        assert!(matches!(read_points_from(csv.as_bytes(), InputFormat::Json), Err(Error::Json(_))));
    }
}
