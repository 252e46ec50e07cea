//! Unit tests for mob-schedule.

#[cfg(test)]
mod activity {
    use mob_core::GridPos;

    use crate::activity::{alternatives, label_matches};
    use crate::{ActivityCategory, ActivityTemplate, CategoryMap, TripObjective};

    #[test]
    fn default_categories() {
        let map = CategoryMap::default();
        assert_eq!(map.category("home"), ActivityCategory::Home);
        assert_eq!(map.category("RL"), ActivityCategory::Home);
        assert_eq!(map.category("school"), ActivityCategory::Work);
        assert_eq!(map.category("OM"), ActivityCategory::Work);
        assert_eq!(map.category("leisure"), ActivityCategory::Other);
        assert_eq!(CategoryMap::empty().category("home"), ActivityCategory::Other);
    }

    #[test]
    fn alternatives_split_and_trim() {
        let alts: Vec<&str> = alternatives(" RS | RM ||").collect();
        assert_eq!(alts, vec!["RS", "RM"]);
        assert!(label_matches("RS|RM", "RM"));
        assert!(label_matches("home", "home"));
        assert!(!label_matches("work", "home"));
    }

    #[test]
    fn template_runs_and_slots() {
        let t = ActivityTemplate::from_runs(&[("home", 7), ("work", 9), ("leisure", 3), ("home", 5)]);
        assert_eq!(t.len(), 24);
        assert_eq!(t.slot(6), Some("home"));
        assert_eq!(t.slot(7), Some("work"));
        assert_eq!(t.slot(24), None);
    }

    #[test]
    fn activation_rule() {
        let mut o = TripObjective::new(8, 15, "work", GridPos::new(1, 1));
        assert!(!o.is_due(8, 14));
        assert!(o.is_due(8, 15));
        assert!(o.is_due(8, 59));
        assert!(!o.is_due(9, 0), "a missed hour is never due again");
        o.completed = true;
        assert!(!o.is_due(8, 30));
    }
}

#[cfg(test)]
mod generator {
    use mob_core::{AgentId, AgentRng, GridPos};
    use mob_spatial::GridSpace;

    use crate::{generate_objectives, ActivityTemplate, Anchors, CategoryMap};

    fn setup() -> (GridSpace, CategoryMap, AgentRng) {
        (GridSpace::new(50, 50).unwrap(), CategoryMap::default(), AgentRng::new(11, AgentId(3)))
    }

    fn young_professional() -> ActivityTemplate {
        ActivityTemplate::from_runs(&[("home", 7), ("work", 9), ("leisure", 3), ("home", 5)])
    }

    #[test]
    fn transitions_become_objectives() {
        let (grid, cats, mut rng) = setup();
        let mut anchors = Anchors::default();
        let objs = generate_objectives(Some(&young_professional()), "home", &mut anchors, &grid, &cats, &mut rng);

        let plan: Vec<(u32, &str)> = objs.iter().map(|o| (o.hour, o.activity.as_str())).collect();
        assert_eq!(plan, vec![(7, "work"), (16, "leisure"), (19, "home")]);
        assert!(objs.iter().all(|o| o.minute <= 59 && !o.completed && o.start_tick.is_none()));
        assert!(objs.iter().all(|o| grid.contains(o.destination)));
        assert_eq!(Some(objs[0].destination), anchors.work);
        assert_eq!(Some(objs[2].destination), anchors.home);
    }

    #[test]
    fn first_slot_compared_to_current_activity() {
        let (grid, cats, mut rng) = setup();
        let mut anchors = Anchors::default();
        let objs = generate_objectives(Some(&young_professional()), "work", &mut anchors, &grid, &cats, &mut rng);
        assert_eq!(objs[0].hour, 0);
        assert_eq!(objs[0].activity, "home");
        assert_eq!(objs.len(), 4);
    }

    #[test]
    fn missing_or_empty_template_yields_nothing() {
        let (grid, cats, mut rng) = setup();
        let mut anchors = Anchors::default();
        assert!(generate_objectives(None, "home", &mut anchors, &grid, &cats, &mut rng).is_empty());
        let empty = ActivityTemplate::default();
        assert!(generate_objectives(Some(&empty), "home", &mut anchors, &grid, &cats, &mut rng).is_empty());
        let blanks = ActivityTemplate::from_runs(&[("", 24)]);
        assert!(generate_objectives(Some(&blanks), "home", &mut anchors, &grid, &cats, &mut rng).is_empty());
    }

    #[test]
    fn slots_past_midnight_are_ignored() {
        let (grid, cats, mut rng) = setup();
        let mut anchors = Anchors::default();
        let long = ActivityTemplate::from_runs(&[("home", 24), ("work", 6)]);
        assert!(generate_objectives(Some(&long), "home", &mut anchors, &grid, &cats, &mut rng).is_empty());
    }

    #[test]
    fn cached_anchors_are_reused() {
        let (grid, cats, mut rng) = setup();
        let home = GridPos::new(4, 4);
        let mut anchors = Anchors { home: Some(home), work: None };
        let t = young_professional();
        let day1 = generate_objectives(Some(&t), "home", &mut anchors, &grid, &cats, &mut rng);
        let day2 = generate_objectives(Some(&t), "home", &mut anchors, &grid, &cats, &mut rng);
        assert_eq!(day1[2].destination, home);
        assert_eq!(day1[0].destination, day2[0].destination);
        assert_eq!(anchors.home, Some(home));
    }

    #[test]
    fn alternatives_pick_one_label() {
        let (grid, cats, mut rng) = setup();
        let mut anchors = Anchors::default();
        let t = ActivityTemplate::from_runs(&[("work", 8), ("RS|RM", 16)]);
        let objs = generate_objectives(Some(&t), "work", &mut anchors, &grid, &cats, &mut rng);
        assert_eq!(objs.len(), 1);
        assert!(objs[0].activity == "RS" || objs[0].activity == "RM");
        assert_eq!(Some(objs[0].destination), anchors.home);
    }
}

#[cfg(test)]
mod modifier {
    use std::collections::HashMap;

    use mob_core::{AgentId, AgentRng, GridPos, RouteKey};

    use crate::{
        adjust_departures, DelayLookup, DepartureModifier, DepartureModifierExt,
        LearnedDelayDeparture, NoAdjustment, TripObjective,
    };

    struct Delays(HashMap<RouteKey, f64>);

    impl DelayLookup for Delays {
        fn average_delay(&self, route: RouteKey) -> Option<f64> {
            self.0.get(&route).copied()
        }
    }

    const HOME: GridPos = GridPos::new(0, 0);
    const WORK: GridPos = GridPos::new(9, 0);

    fn rng() -> AgentRng {
        AgentRng::new(0, AgentId(0))
    }

    #[test]
    fn shifts_by_truncated_average() {
        let delays = Delays(HashMap::from([(RouteKey::new(HOME, WORK), 12.7)]));
        let planned = TripObjective::new(7, 30, "work", WORK);
        let out = LearnedDelayDeparture.modify(AgentId(0), HOME, &planned, &delays, &mut rng()).unwrap();
        assert_eq!(out.minute, 18);
        assert_eq!(out.hour, 7);
    }

    #[test]
    fn shift_saturates_at_zero() {
        let delays = Delays(HashMap::from([(RouteKey::new(HOME, WORK), 45.0)]));
        let planned = TripObjective::new(7, 30, "work", WORK);
        let out = LearnedDelayDeparture.modify(AgentId(0), HOME, &planned, &delays, &mut rng()).unwrap();
        assert_eq!(out.minute, 0);
    }

    #[test]
    fn unknown_route_is_untouched() {
        let planned = TripObjective::new(7, 30, "work", WORK);
        assert!(LearnedDelayDeparture.modify(AgentId(0), HOME, &planned, &(), &mut rng()).is_none());
        assert!(NoAdjustment.modify(AgentId(0), HOME, &planned, &(), &mut rng()).is_none());
    }

    #[test]
    fn chain_keeps_first_result() {
        let delays = Delays(HashMap::from([(RouteKey::new(HOME, WORK), 10.0)]));
        let planned = TripObjective::new(7, 30, "work", WORK);
        let chain = LearnedDelayDeparture.then(NoAdjustment);
        let out = chain.modify(AgentId(0), HOME, &planned, &delays, &mut rng()).unwrap();
        assert_eq!(out.minute, 20);
    }

    #[test]
    fn origin_threads_through_destinations() {
        // only the WORK -> HOME leg has a learned delay
        let delays = Delays(HashMap::from([(RouteKey::new(WORK, HOME), 5.0)]));
        let mut objs = vec![
            TripObjective::new(7, 30, "work", WORK),
            TripObjective::new(17, 30, "home", HOME),
        ];
        let changed = adjust_departures(AgentId(0), HOME, &mut objs, &LearnedDelayDeparture, &delays, &mut rng());
        assert_eq!(changed, 1);
        assert_eq!(objs[0].minute, 30);
        assert_eq!(objs[1].minute, 25);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_categories_reader, load_templates_reader, ActivityCategory, ScheduleError};

    #[test]
    fn templates_from_long_rows() {
        let csv = "profile,hour,activity\nRetirees,0,home\nStudent,0,home\nStudent,8,school\nStudent,15, leisure|RS \n";
        let t = load_templates_reader(Cursor::new(csv)).unwrap();
        assert_eq!(t.len(), 2);
        let student = &t["Student"];
        assert_eq!(student.slot(8), Some("school"));
        assert_eq!(student.slot(3), Some(""));
        assert_eq!(student.slot(15), Some("leisure|RS"));
    }

    #[test]
    fn hour_out_of_range_is_rejected() {
        let csv = "profile,hour,activity\nX,24,home\n";
        let err = load_templates_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ScheduleError::HourOutOfRange { hour: 24, .. }));
    }

    #[test]
    fn malformed_row_is_a_parse_error() {
        let csv = "profile,hour,activity\nX,noon,home\n";
        assert!(matches!(load_templates_reader(Cursor::new(csv)), Err(ScheduleError::Parse(_))));
    }

    #[test]
    fn category_map_from_csv() {
        let csv = "label,category\ngym,other\ncampus,work\nflat,home\n";
        let map = load_categories_reader(Cursor::new(csv)).unwrap();
        assert_eq!(map.category("campus"), ActivityCategory::Work);
        assert_eq!(map.category("flat"), ActivityCategory::Home);
        assert_eq!(map.category("home"), ActivityCategory::Other);
        let bad = "label,category\ngym,space\n";
        assert!(matches!(load_categories_reader(Cursor::new(bad)), Err(ScheduleError::UnknownCategory(_))));
    }
}
