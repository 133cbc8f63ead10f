//! Unit tests for yard-layout.

use yard_core::{SwitchId, TrackId, TrainId};

use crate::RouteRecord;

fn route(inbound: u32, s: [u32; 3], outbound: u32) -> RouteRecord {
    RouteRecord::new(
        TrackId(inbound),
        s.map(SwitchId),
        TrackId(outbound),
    )
}

#[cfg(test)]
mod fleet_entry {
    use super::*;
    use crate::{FleetEntry, LayoutError, validate_fleet};

    #[test]
    fn starts_incomplete() {
        let e = FleetEntry::new(TrainId(1), TrackId(10), TrackId(20));
        assert!(!e.is_completed());
    }

    #[test]
    fn completion_transitions_once() {
        let mut e = FleetEntry::new(TrainId(1), TrackId(10), TrackId(20));
        assert!(e.mark_completed());
        assert!(e.is_completed());
        assert!(!e.mark_completed());
        assert!(e.is_completed());
    }

    fn entry(id: u32) -> FleetEntry {
        FleetEntry::new(TrainId(id), TrackId(1), TrackId(2))
    }

    #[test]
    fn fleet_ids_must_be_positive_and_unique() {
        assert!(validate_fleet(&[entry(1), entry(2), entry(u32::MAX - 1)]).is_ok());
        assert!(validate_fleet(&[]).is_ok());
        assert!(matches!(
            validate_fleet(&[entry(1), entry(0)]),
            Err(LayoutError::InvalidTrain(TrainId(0)))
        ));
        assert!(matches!(
            validate_fleet(&[entry(u32::MAX)]),
            Err(LayoutError::InvalidTrain(_))
        ));
        assert!(matches!(
            validate_fleet(&[entry(3), entry(5), entry(3)]),
            Err(LayoutError::DuplicateTrain(TrainId(3)))
        ));
    }
}

#[cfg(test)]
mod route_table {
    use super::*;
    use crate::{LayoutError, RouteStep, RouteTable};

    #[test]
    fn exact_match_found() {
        let table = RouteTable::new(vec![route(10, [1, 2, 3], 20)], 10).unwrap();
        let r = table.find_route(TrackId(10), TrackId(20)).unwrap();
        assert_eq!(r.first(), SwitchId(1));
        assert_eq!(r.second(), SwitchId(2));
        assert_eq!(r.third(), SwitchId(3));
    }

    #[test]
    fn partial_match_is_not_found() {
        let table = RouteTable::new(vec![route(10, [1, 2, 3], 20)], 10).unwrap();
        assert!(table.find_route(TrackId(10), TrackId(21)).is_none());
        assert!(table.find_route(TrackId(11), TrackId(20)).is_none());
        assert!(table.find_route(TrackId(20), TrackId(10)).is_none());
    }

    #[test]
    fn empty_table_finds_nothing() {
        let table = RouteTable::new(vec![], 10).unwrap();
        assert!(table.is_empty());
        assert!(table.find_route(TrackId(99), TrackId(88)).is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let table = RouteTable::new(
            vec![route(1, [1, 2, 3], 2), route(1, [4, 5, 6], 2)],
            10,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.find_route(TrackId(1), TrackId(2)).unwrap().first(), SwitchId(1));
    }

    #[test]
    fn reserved_switch_rejected() {
        let err = RouteTable::new(vec![route(1, [0, 2, 3], 2)], 10).unwrap_err();
        assert!(matches!(err, LayoutError::Yard(_)), "{err}");
    }

    #[test]
    fn out_of_range_switch_rejected() {
        assert!(RouteTable::new(vec![route(1, [1, 2, 11], 2)], 10).is_err());
        assert!(RouteTable::new(vec![route(1, [1, 2, 11], 2)], 11).is_ok());
    }

    #[test]
    fn repeated_switch_rejected() {
        let err = RouteTable::new(vec![route(1, [4, 5, 4], 2)], 10).unwrap_err();
        match err {
            LayoutError::RepeatedSwitch { switch, .. } => assert_eq!(switch, SwitchId(4)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn steps_follow_acquisition_order() {
        let r = route(1, [7, 3, 9], 2);
        let steps: Vec<_> = r.steps().collect();
        assert_eq!(
            steps,
            vec![
                (RouteStep::First, SwitchId(7)),
                (RouteStep::Second, SwitchId(3)),
                (RouteStep::Third, SwitchId(9)),
            ]
        );
    }
}

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::{LayoutError, load_fleet_csv, load_fleet_reader, load_yard_reader};

    const FLEET: &[u8] = b"1,1,8\n2,2,7\n 3 , 4 , 9 \n";
    const YARD: &[u8] = b"1,1,5,6,8\n2,2,3,4,7\n";

    #[test]
    fn loads_fleet_in_order() {
        let fleet = load_fleet_reader(Cursor::new(FLEET)).unwrap();
        assert_eq!(fleet.len(), 3);
        assert_eq!(fleet[0].train, TrainId(1));
        assert_eq!(fleet[1].inbound, TrackId(2));
        assert_eq!(fleet[1].outbound, TrackId(7));
        assert!(fleet.iter().all(|e| !e.is_completed()));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let fleet = load_fleet_reader(Cursor::new(FLEET)).unwrap();
        assert_eq!(fleet[2].train, TrainId(3));
        assert_eq!(fleet[2].outbound, TrackId(9));
    }

    #[test]
    fn loads_yard_switch_order() {
        let yard = load_yard_reader(Cursor::new(YARD)).unwrap();
        assert_eq!(yard, vec![route(1, [1, 5, 6], 8), route(2, [2, 3, 4], 7)]);
    }

    #[test]
    fn empty_input_yields_empty_tables() {
        assert!(load_fleet_reader(Cursor::new(b"")).unwrap().is_empty());
        assert!(load_yard_reader(Cursor::new(b"")).unwrap().is_empty());
    }

    #[test]
    fn wrong_field_count_errors() {
        let err = load_fleet_reader(Cursor::new(b"1,1,8\n2,2\n".as_slice())).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("expected 3 fields"), "{msg}");

        assert!(load_yard_reader(Cursor::new(b"1,1,5,6\n".as_slice())).is_err());
    }

    #[test]
    fn non_numeric_field_errors() {
        let result = load_yard_reader(Cursor::new(b"1,a,5,6,8\n".as_slice()));
        assert!(matches!(result, Err(LayoutError::Parse(_))));
    }

    #[test]
    fn duplicate_train_errors() {
        let result = load_fleet_reader(Cursor::new(b"4,1,8\n4,2,7\n".as_slice()));
        assert!(matches!(result, Err(LayoutError::DuplicateTrain(TrainId(4)))));
    }

    #[test]
    fn zero_train_id_errors() {
        let result = load_fleet_reader(Cursor::new(b"1,1,8\n0,1,2\n".as_slice()));
        assert!(matches!(result, Err(LayoutError::InvalidTrain(TrainId(0)))));
    }

    #[test]
    fn sentinel_train_id_errors() {
        let result = load_fleet_reader(Cursor::new(b"4294967295,1,2\n".as_slice()));
        assert!(matches!(result, Err(LayoutError::InvalidTrain(TrainId::INVALID))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FLEET).unwrap();
        let fleet = load_fleet_csv(file.path()).unwrap();
        assert_eq!(fleet.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_fleet_csv(std::path::Path::new("/nonexistent/theFleetFile.csv"));
        assert!(matches!(result, Err(LayoutError::Io(_))));
    }
}
