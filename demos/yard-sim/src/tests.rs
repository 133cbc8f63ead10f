use std::time::Duration;

use clap::Parser;

use yard_core::{SwitchId, TrackId, YardConfig};
use yard_layout::{RouteRecord, RouteTable, load_fleet_csv, load_yard_csv};

use crate::Args;
use crate::settings::ConfigFile;
use crate::synth::random_fleet;

fn route(inbound: u32, s: [u32; 3], outbound: u32) -> RouteRecord {
    RouteRecord::new(TrackId(inbound), s.map(SwitchId), TrackId(outbound))
}

#[cfg(test)]
mod config_file {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let file = ConfigFile::parse("{}").unwrap();
        assert_eq!(file.to_config().unwrap(), YardConfig::default());
    }

    #[test]
    fn camel_case_keys() {
        let file = ConfigFile::parse(
            r#"{ "firstSwitchTimeout": 300, "backoffDelay": 20, "maxTrains": 5, "switchCount": 12 }"#,
        )
        .unwrap();
        let config = file.to_config().unwrap();
        assert_eq!(config.pacing.first_switch_timeout, Duration::from_millis(300));
        assert_eq!(config.pacing.backoff_delay, Duration::from_millis(20));
        assert_eq!(config.max_trains, 5);
        assert_eq!(config.switch_count, 12);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(ConfigFile::parse(r#"{ "firstSwitchTimout": 300 }"#).is_err());
    }

    #[test]
    fn cli_overrides_file() {
        let file = ConfigFile { backoff_delay: Some(10), max_trains: Some(4), ..Default::default() };
        let cli = ConfigFile { backoff_delay: Some(99), ..Default::default() };
        let merged = file.merge(cli);
        assert_eq!(merged.backoff_delay, Some(99));
        assert_eq!(merged.max_trains, Some(4));
    }

    #[test]
    fn invalid_pacing_rejected() {
        // Second timeout longer than the first.
        let file = ConfigFile { second_switch_timeout: Some(500), ..Default::default() };
        assert!(file.to_config().is_err());
    }

    #[test]
    fn args_feed_overrides() {
        let args = Args::parse_from(["yard-sim", "--transit-delay", "40", "--worker-slots", "3"]);
        let o = args.overrides();
        assert_eq!(o.transit_delay, Some(40));
        assert_eq!(o.worker_slots, Some(3));
        assert_eq!(o.first_switch_timeout, None);
    }

    #[test]
    fn seed_requires_random_fleet() {
        assert!(Args::try_parse_from(["yard-sim", "--seed", "3"]).is_err());
        assert!(Args::try_parse_from(["yard-sim", "--random-fleet", "4", "--seed", "3"]).is_ok());
    }
}

#[cfg(test)]
mod fleet_synth {
    use super::*;

    fn yard() -> Vec<RouteRecord> {
        vec![route(1, [1, 5, 6], 8), route(2, [2, 3, 4], 7), route(3, [3, 4, 9], 6)]
    }

    #[test]
    fn same_seed_same_fleet() {
        assert_eq!(random_fleet(20, &yard(), 7), random_fleet(20, &yard(), 7));
    }

    #[test]
    fn tracks_come_from_the_yard() {
        let fleet = random_fleet(50, &yard(), 1);
        assert_eq!(fleet.len(), 50);
        for (n, e) in fleet.iter().enumerate() {
            assert_eq!(e.train.0, n as u32 + 1);
            assert!([1, 2, 3].contains(&e.inbound.0));
            assert!([6, 7, 8].contains(&e.outbound.0));
            assert!(!e.is_completed());
        }
    }

    #[test]
    fn empty_yard_gives_empty_fleet() {
        assert!(random_fleet(5, &[], 1).is_empty());
    }
}

#[cfg(test)]
mod bundled_data {
    use std::path::Path;

    use super::*;

    #[test]
    fn bundled_tables_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let fleet = load_fleet_csv(&dir.join("theFleetFile.csv")).unwrap();
        let yard = load_yard_csv(&dir.join("theYardFile.csv")).unwrap();
        assert_eq!(fleet.len(), 15);

        let table = RouteTable::new(yard, YardConfig::DEFAULT_SWITCH_COUNT).unwrap();
        let routed = fleet
            .iter()
            .filter(|e| table.find_route(e.inbound, e.outbound).is_some())
            .count();
        assert_eq!(routed, 13);
    }
}

#[cfg(test)]
mod tables {
    use std::fs;

    use yard_dispatch::DispatcherBuilder;

    use super::*;
    use crate::load_tables;

    #[tokio::test]
    async fn empty_yard_holds_every_train() {
        let dir = tempfile::tempdir().unwrap();
        let fleet_path = dir.path().join("fleet.csv");
        let yard_path = dir.path().join("yard.csv");
        fs::write(&fleet_path, "2,99,88\n3,1,2\n").unwrap();
        fs::write(&yard_path, "").unwrap();

        let args = Args::parse_from([
            "yard-sim",
            "--fleet",
            fleet_path.to_str().unwrap(),
            "--yard",
            yard_path.to_str().unwrap(),
        ]);
        let (fleet, yard) = load_tables(&args).unwrap();
        assert_eq!(fleet.len(), 2);
        assert!(yard.is_empty());

        let report = DispatcherBuilder::new(YardConfig::default(), fleet, yard)
            .build()
            .unwrap()
            .run()
            .await;
        assert_eq!(report.halted().count(), 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn random_fleet_count_is_bounded() {
        assert!(Args::try_parse_from(["yard-sim", "--random-fleet", "0"]).is_err());
        assert!(Args::try_parse_from(["yard-sim", "--random-fleet", "4294967295"]).is_err());
        assert!(Args::try_parse_from(["yard-sim", "--random-fleet", "99999999999"]).is_err());
        let args = Args::try_parse_from(["yard-sim", "--random-fleet", "12"]).unwrap();
        assert_eq!(args.random_fleet, Some(12));
    }
}
