//! Unit tests for fd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, RequestId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(RequestId(0) < RequestId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(VehicleId(0).to_string(), "VehicleId(0)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(100.0, 120.0);
        let b = Point::new(130.0, 160.0);
        assert_eq!(a.distance(b), b.distance(a));
        assert!((a.distance(b) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn zero_distance() {
        let p = Point::new(3.0, -4.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn step_toward_preserves_direction() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(30.0, 40.0); // 50 units away
        let p = from.step_toward(to, 5.0);
        assert!((p.x - 3.0).abs() < 1e-12);
        assert!((p.y - 4.0).abs() < 1e-12);
        assert!((from.distance(p) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn step_toward_never_overshoots() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(2.0, 0.0);
        assert_eq!(from.step_toward(to, 5.0), to);
        assert_eq!(to.step_toward(to, 5.0), to);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(20).as_units(), 20.0);
    }

    #[test]
    fn clock_advances_one_tick() {
        let mut clock = SimClock::new();
        assert_eq!(clock.now(), Tick(0));
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), Tick(2));
        assert_eq!(clock.to_string(), "T2");
    }
}

#[cfg(test)]
mod config {
    use crate::DispatchConfig;

    #[test]
    fn defaults_match_documented_values() {
        let c = DispatchConfig::default();
        assert_eq!(c.capacity, 15);
        assert_eq!(c.motion_step, 5.0);
        assert_eq!(c.arrival_threshold, 5.0);
        assert_eq!(c.resolution_interval_ms, 500);
        assert_eq!(c.delay_ratio_threshold, 1.3);
        assert_eq!(c.delay_absolute_threshold, 10.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let c = DispatchConfig { capacity: 0, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn non_positive_step_rejected() {
        let c = DispatchConfig { motion_step: 0.0, ..Default::default() };
        assert!(c.validate().is_err());
        let c = DispatchConfig { motion_step: f64::NAN, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn ratio_below_one_rejected() {
        let c = DispatchConfig { delay_ratio_threshold: 0.9, ..Default::default() };
        assert!(c.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(7);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        assert_ne!(c1.gen_range(0..u64::MAX), c2.gen_range(0..u64::MAX));
    }

    #[test]
    fn choose_pair_is_distinct() {
        let mut rng = SimRng::new(3);
        let items = [1u32, 2, 3];
        for _ in 0..200 {
            let (a, b) = rng.choose_pair(&items).unwrap();
            assert_ne!(a, b);
        }
        assert!(rng.choose_pair(&[1u32]).is_none());
    }
}
