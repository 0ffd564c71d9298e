use chrono::{DateTime, Duration, TimeZone, Utc};
use oven_batch::models::{Attribute, Instance, Job, JobId, Machine, MachineId, SolutionType};
use oven_batch::scheduler::{
    check_satisfiability, run_simple_greedy, run_simple_greedy_single_job, GreedyConfig,
    GreedyScheduler, ScheduleKpi,
};
use oven_batch::validation::check_solution;
use oven_batch::ScheduleError;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 6, 0, 0).unwrap()
}

fn at(secs: i64) -> DateTime<Utc> {
    start() + Duration::seconds(secs)
}

fn base(horizon: i64) -> Instance {
    Instance::new(start(), at(horizon))
        .with_attribute(
            Attribute::new(1)
                .with_setup_times(vec![0, 900])
                .with_setup_costs(vec![0, 50]),
        )
        .with_attribute(
            Attribute::new(2)
                .with_setup_times(vec![600, 0])
                .with_setup_costs(vec![40, 0]),
        )
}

#[test]
fn scenario_single_job_starts_at_zero() {
    let inst = base(86_400)
        .with_machine(Machine::new(1).with_capacity(0, 5).with_shift(start(), at(86_400)))
        .with_job(
            Job::new(1, start(), at(86_400))
                .with_processing_time(600, 600)
                .with_machine(1, 1),
        );

    let out = run_simple_greedy(&inst).unwrap();
    assert_eq!(out.assignment_count(), 1);
    assert_eq!(out.solution_type, SolutionType::UnvalidatedSolution);

    let batch = out.batch_of_job(JobId(1)).unwrap();
    assert_eq!(batch.start, 0);
    assert_eq!(out.start_time(batch), start());
    assert_eq!(out.end_time(batch), at(600));
}

#[test]
fn scenario_compatible_jobs_merge() {
    let inst = base(86_400)
        .with_machine(Machine::new(1).with_capacity(0, 5).with_shift(start(), at(86_400)))
        .with_job(
            Job::new(1, start(), at(7_200))
                .with_processing_time(600, 1_200)
                .with_size(2)
                .with_machine(1, 2),
        )
        .with_job(
            Job::new(2, start(), at(7_200))
                .with_processing_time(900, 1_500)
                .with_size(3)
                .with_machine(1, 2),
        );

    let out = run_simple_greedy(&inst).unwrap();
    assert_eq!(out.batch_count(), 1);
    assert_eq!(out.assignment_count(), 2);

    let batch = out.batch_of_job(JobId(1)).unwrap();
    assert_eq!(out.batch_of_job(JobId(2)).unwrap().id, batch.id);
    assert_eq!(batch.duration(), 900);
}

#[test]
fn scenario_tardy_job_is_scheduled() {
    let inst = base(86_400)
        .with_machine(
            Machine::new(1)
                .with_capacity(0, 5)
                .with_shift(at(3_600), at(86_400)),
        )
        .with_job(
            Job::new(1, start(), at(1_800))
                .with_processing_time(600, 600)
                .with_machine(1, 1),
        );

    let out = run_simple_greedy(&inst).unwrap();
    let batch = out.batch_of_job(JobId(1)).unwrap();
    assert_eq!(batch.start, 3_600);
    assert!(out.end_time(batch) > at(1_800));

    let violations = check_solution(&inst, &out);
    assert_eq!(violations.len(), 1);
    assert!(!violations[0].is_hard());
}

#[test]
fn scenario_no_shift_never_scheduled() {
    let inst = base(86_400)
        .with_machine(Machine::new(1).with_capacity(0, 5))
        .with_machine(Machine::new(2).with_capacity(0, 5).with_shift(start(), at(86_400)))
        .with_job(
            Job::new(1, start(), at(86_400))
                .with_processing_time(600, 600)
                .with_machine(1, 1),
        )
        .with_job(
            Job::new(2, start(), at(86_400))
                .with_processing_time(600, 600)
                .with_machine(2, 1),
        );

    let out = run_simple_greedy(&inst).unwrap();
    assert!(!out.is_scheduled(JobId(1)));
    assert!(out.is_scheduled(JobId(2)));

    let report = check_satisfiability(&inst, GreedyConfig::default()).unwrap();
    assert_eq!(report.unschedulable, vec![JobId(1)]);
}

#[test]
fn batches_follow_setup_and_shift_breaks() {
    let inst = base(86_400)
        .with_machine(
            Machine::new(1)
                .with_capacity(0, 4)
                .with_shift(start(), at(2_000))
                .with_shift(at(7_200), at(14_400)),
        )
        .with_initial_state(1, 2)
        .with_job(
            Job::new(1, start(), at(3_600))
                .with_processing_time(900, 900)
                .with_size(4)
                .with_machine(1, 2),
        )
        .with_job(
            Job::new(2, start(), at(9_000))
                .with_processing_time(900, 900)
                .with_size(2)
                .with_machine(1, 1),
        );

    let out = run_simple_greedy(&inst).unwrap();
    let first = out.batch_of_job(JobId(1)).unwrap();
    let second = out.batch_of_job(JobId(2)).unwrap();

    // no setup from the initial state, batch fills the machine
    assert_eq!((first.start, first.end), (0, 900));
    // 900 + 600 setup + 900 exceeds the first shift, wait for the second
    assert_eq!((second.start, second.end), (7_800, 8_700));

    let dictionary = out.batch_dictionary();
    assert_eq!(dictionary.get(&(MachineId(1), 0)), Some(&first.id));
    assert_eq!(dictionary.get(&(MachineId(1), 1)), Some(&second.id));

    let kpi = ScheduleKpi::calculate(&inst, &out).unwrap();
    assert_eq!(kpi.total_setup_time, 600);
    assert_eq!(kpi.total_setup_cost, 40);
    assert!(kpi.is_perfect());
}

#[test]
fn coarser_tick_delays_release() {
    let inst = base(86_400)
        .with_machine(Machine::new(1).with_capacity(0, 5).with_shift(start(), at(86_400)))
        .with_job(
            Job::new(1, at(61), at(86_400))
                .with_processing_time(600, 600)
                .with_machine(1, 1),
        );

    let minute = GreedyScheduler::new().run(&inst).unwrap();
    let coarse = GreedyScheduler::new()
        .with_config(GreedyConfig::new().with_tick(300))
        .run(&inst)
        .unwrap();

    assert_eq!(minute.batch_of_job(JobId(1)).unwrap().start, 120);
    assert_eq!(coarse.batch_of_job(JobId(1)).unwrap().start, 300);
}

#[test]
fn probe_is_idempotent() {
    let inst = base(86_400)
        .with_machine(
            Machine::new(1)
                .with_capacity(0, 5)
                .with_shift(at(1_800), at(86_400)),
        )
        .with_job(
            Job::new(7, start(), at(86_400))
                .with_processing_time(600, 600)
                .with_machine(1, 1),
        );

    let first = run_simple_greedy_single_job(&inst).unwrap();
    let second = run_simple_greedy_single_job(&inst).unwrap();
    assert_eq!(first.assignments, second.assignments);
    assert_eq!(first.batch_of_job(JobId(7)).unwrap().start, 1_800);
}

#[test]
fn empty_instance_is_rejected() {
    let inst = base(3_600).with_machine(Machine::new(1).with_capacity(0, 5));
    let err = run_simple_greedy(&inst).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidInstance(_)));
    assert!(err.to_string().starts_with("invalid instance"));
}

#[test]
fn instance_from_json() {
    let json = r#"{
        "machines": {
            "1": {
                "id": 1,
                "min_cap": 0,
                "max_cap": 6,
                "shifts": [
                    { "start": "2024-03-04T06:00:00Z", "end": "2024-03-04T14:00:00Z" }
                ]
            }
        },
        "jobs": [
            {
                "id": 1,
                "name": "bread",
                "earliest_start": "2024-03-04T06:00:00Z",
                "latest_end": "2024-03-04T08:00:00Z",
                "min_time": 1200,
                "max_time": 1800,
                "size": 3,
                "attribute_per_machine": { "1": 1 },
                "eligible_machines": [1]
            },
            {
                "id": 2,
                "earliest_start": "2024-03-04T06:00:00Z",
                "latest_end": "2024-03-04T09:00:00Z",
                "min_time": 1500,
                "max_time": 2400,
                "size": 3,
                "attribute_per_machine": { "1": 1 },
                "eligible_machines": [1]
            }
        ],
        "attributes": {
            "1": { "id": 1, "setup_costs": [0], "setup_times": [0] }
        },
        "horizon_start": "2024-03-04T06:00:00Z",
        "horizon_end": "2024-03-05T06:00:00Z"
    }"#;

    let inst: Instance = serde_json::from_str(json).unwrap();
    assert_eq!(inst.jobs[0].name, "bread");
    assert!(inst.initial_states.is_empty());

    let out = run_simple_greedy(&inst).unwrap();
    assert_eq!(out.batch_count(), 1);
    assert_eq!(out.batch_of_job(JobId(2)).unwrap().duration(), 1_500);

    let encoded = serde_json::to_string(&out).unwrap();
    assert!(encoded.contains("UnvalidatedSolution"));
}
