#[cfg(test)]
mod tests {
    use crate::{Args, run};
    use clap::Parser;
    use geo_hotspots::cluster::InvalidParameter;
    use geo_hotspots::{Error, Label};
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("geo_hotspots_{}_{}", std::process::id(), name))
    }

    fn parse_args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("geo_hotspots").chain(extra.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_main_program() {
        // Create a test CSV file
        let test_csv = "latitude,longitude
40.7128,-74.0060
40.7130,-74.0062
40.7132,-74.0064
40.7500,-73.9900
40.7502,-73.9902
40.7504,-73.9904
40.8000,-73.9500
41.0000,-74.0000";

        let input = temp_path("points.csv");
        let output = temp_path("clusters.json");
        let map = temp_path("map.html");
        fs::write(&input, test_csv).expect("Failed to create test CSV");

        let args = parse_args(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--map",
            map.to_str().unwrap(),
            "-e",
            "1",
            "-m",
            "3",
        ]);
        let report = run(&args).expect("run succeeds");

        let labels: Vec<Label> = report.clusters.iter().map(|r| r.cluster).collect();
        let (c0, c1, n) = (Label::Cluster(0), Label::Cluster(1), Label::Noise);
        assert_eq!(labels, vec![c0, c0, c0, c1, c1, c1, n, n]);
        assert_eq!(report.clusters_count, 2);
        assert_eq!(report.noise_count, 2);
        assert_eq!(report.map_file.as_deref(), map.to_str());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["clusters"][7]["cluster"], -1);
        assert_eq!(written["clusters_count"], 2);

        let html = fs::read_to_string(&map).unwrap();
        assert!(html.contains(r#""color":"blue","popup":"Cluster 1""#));

        // Clean up
        for path in [input, output, map] {
            fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_json_input_and_csv_output() {
        let input = temp_path("request.json");
        let output = temp_path("clusters.csv");
        fs::write(
            &input,
            r#"{"points": [
                {"longitude": 75.0, "latitude": 15.0},
                {"longitude": 75.0, "latitude": 15.089932036372454},
                {"longitude": 75.0, "latitude": 19.4966018}
            ]}"#,
        )
        .unwrap();

        let args = parse_args(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--format",
            "csv",
            "--index",
            "tree",
        ]);
        run(&args).expect("run succeeds");

        let csv = fs::read_to_string(&output).unwrap();
        let last_column: Vec<&str> = csv.lines().skip(1).filter_map(|l| l.rsplit(',').next()).collect();
        assert_eq!(last_column, vec!["0", "0", "-1"]);

        for path in [input, output] {
            fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_invalid_parameters_fail_before_reading() {
        let missing = temp_path("does_not_exist.csv");

        let args = parse_args(&["-i", missing.to_str().unwrap(), "-e", "0"]);
        assert!(matches!(run(&args), Err(Error::InvalidParameter(_))));

        let args = parse_args(&["-i", missing.to_str().unwrap(), "--earth-radius=0"]);
        assert!(matches!(run(&args), Err(Error::InvalidParameter(_))));

        let args = parse_args(&["-i", missing.to_str().unwrap()]);
        assert!(matches!(run(&args), Err(Error::Io(_))));
    }

    #[test]
    fn test_malformed_input_fails_whole_run() {
        let input = temp_path("bad.csv");
        let output = temp_path("bad.json");
        fs::write(&input, "latitude,longitude\n10.0,20.0\n100.0,20.0\n").unwrap();

        let args = parse_args(&["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        assert!(matches!(run(&args), Err(Error::MalformedInput { record: 3, .. })));
        assert!(!output.exists());

        fs::remove_file(input).ok();
    }

    #[test]
    fn test_map_center() {
        let style = parse_args(&["--center", "-33.87,151.21"]).map_style().unwrap();
        assert_eq!(style.center, geo_hotspots::Point::new(-33.87, 151.21));

        for center in ["--center=95,10", "--center=10,-181", "--center=10", "--center=1,2,3"] {
            let args = parse_args(&["-i", temp_path("does_not_exist.csv").to_str().unwrap(), center]);
            assert!(
                matches!(run(&args), Err(Error::InvalidParameter(InvalidParameter::MapCenter(_)))),
                "{}",
                center
            );
        }
    }

    #[test]
    fn test_defaults() {
        let args = parse_args(&[]);
        let config = args.cluster_config();
        assert_eq!(config, geo_hotspots::ClusterConfig::default());
        assert_eq!(args.map_style().unwrap(), geo_hotspots::MapStyle::default());
        assert_eq!(args.input, PathBuf::from("points.csv"));
    }
}
