use cpusched::{
    Algorithm, Process, ProcessSet, schedule,
    sim::{Pid, completion_time},
};
use proptest::prelude::*;

fn process_sets() -> impl Strategy<Value = ProcessSet> {
    prop::collection::vec((0u64..40, 1u64..15, -3i32..=3), 1..12).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(index, (arrival, burst, priority))| {
                Process::with_priority(index as Pid + 1, arrival, burst, priority)
            })
            .collect()
    })
}

fn algorithms() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Fcfs),
        Just(Algorithm::SjfPreemptive),
        Just(Algorithm::SjfNonPreemptive),
        Just(Algorithm::PriorityPreemptive),
        Just(Algorithm::PriorityNonPreemptive),
        (1u64..6).prop_map(|quantum| Algorithm::RoundRobin { quantum }),
    ]
}

proptest! {
    #[test]
    fn segments_cover_each_burst_exactly(processes in process_sets(), algorithm in algorithms()) {
        let schedule = schedule(&processes, algorithm).unwrap();
        for process in &processes {
            let ran: u64 = schedule.segments_for(process.id).map(|s| s.duration).sum();
            prop_assert_eq!(ran, process.burst_time);
        }
    }

    #[test]
    fn segments_never_overlap_or_start_early(processes in process_sets(), algorithm in algorithms()) {
        let schedule = schedule(&processes, algorithm).unwrap();
        let mut cursor = 0;
        for segment in &schedule {
            prop_assert!(segment.duration > 0);
            prop_assert!(segment.start >= cursor);
            let arrival = processes.find(|p| p.id == segment.pid).unwrap().arrival_time;
            prop_assert!(segment.start >= arrival);
            cursor = segment.end();
        }
    }

    #[test]
    fn completion_is_never_before_arrival_plus_burst(processes in process_sets(), algorithm in algorithms()) {
        let schedule = schedule(&processes, algorithm).unwrap();
        prop_assert_eq!(schedule.stats().len(), processes.len());
        for stats in schedule.stats() {
            prop_assert!(stats.completion_time >= stats.arrival_time + stats.burst_time);
        }
        prop_assert!(schedule.average_waiting() >= 0.0);
        prop_assert!(schedule.average_turnaround() >= schedule.average_waiting());
    }

    #[test]
    fn makespan_matches_sequential_completion(processes in process_sets(), algorithm in algorithms()) {
        let schedule = schedule(&processes, algorithm).unwrap();
        let mut ordered = processes.as_slice().to_vec();
        ordered.sort_by_key(|p| (p.arrival_time, p.burst_time));
        prop_assert_eq!(
            schedule.metrics().makespan,
            completion_time(&ordered, ordered.len() - 1)
        );
    }

    #[test]
    fn non_preemptive_policies_emit_one_segment_per_process(processes in process_sets()) {
        for algorithm in [
            Algorithm::Fcfs,
            Algorithm::SjfNonPreemptive,
            Algorithm::PriorityNonPreemptive,
        ] {
            let schedule = schedule(&processes, algorithm).unwrap();
            prop_assert_eq!(schedule.len(), processes.len());
            prop_assert_eq!(schedule.metrics().preemptions, 0);
        }
    }

    #[test]
    fn round_robin_segments_fit_in_quantum(processes in process_sets(), quantum in 1u64..6) {
        let schedule = schedule(&processes, Algorithm::RoundRobin { quantum }).unwrap();
        for segment in &schedule {
            prop_assert!(segment.duration <= quantum);
        }
    }

    #[test]
    fn runs_are_deterministic_and_leave_input_alone(processes in process_sets(), algorithm in algorithms()) {
        let before = processes.clone();
        let first = schedule(&processes, algorithm).unwrap();
        let second = schedule(&processes, algorithm).unwrap();
        prop_assert_eq!(&processes, &before);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fcfs_is_stable_arrival_order(processes in process_sets()) {
        let schedule = schedule(&processes, Algorithm::Fcfs).unwrap();
        let mut expected = processes.clone();
        expected.sort_by_key(|p| p.arrival_time);
        let order: Vec<Pid> = schedule.iter().map(|s| s.pid).collect();
        let expected: Vec<Pid> = expected.iter().map(|p| p.id).collect();
        prop_assert_eq!(order, expected);
    }
}
