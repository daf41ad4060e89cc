use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use u_tsp::ga::{DataMode, Generations, Point, PointId, TspParams};
use u_tsp::session::{Progress, ProgressStream, SessionRegistry, Status};

fn points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(i as PointId, ((i * 7) % 13) as f64, ((i * 5) % 11) as f64))
        .collect()
}

fn params() -> TspParams {
    TspParams::default()
        .with_population_size(16)
        .with_elite_size(4)
        .with_mutation_rate(0.3)
        .with_number_of_populations(2)
        .with_seed(5)
}

#[test]
fn completed_run_releases_session() {
    let registry = Arc::new(SessionRegistry::new());
    let stream = ProgressStream::start(
        &registry,
        "client-1",
        points(9),
        params().with_generations(Generations::Fixed(5)),
    )
    .unwrap();
    assert!(registry.is_active("client-1"));

    let updates: Vec<Progress> = stream.collect();
    let statuses: Vec<Status> = updates.iter().map(|u| u.status).collect();
    assert_eq!(
        statuses,
        vec![
            Status::Running,
            Status::Running,
            Status::Running,
            Status::Running,
            Status::Running,
            Status::Completed
        ]
    );
    assert_eq!(updates.last().unwrap().progress, 100.0);
    assert!(!registry.is_active("client-1"));

    // A late stop is a no-op.
    assert!(!registry.stop("client-1"));
}

#[test]
fn stop_from_another_thread_ends_with_last_generation() {
    let registry = Arc::new(SessionRegistry::new());
    let stream = ProgressStream::start(
        &registry,
        "client-2",
        points(10),
        params().with_generations(Generations::Fixed(100)),
    )
    .unwrap();

    let (tick_tx, tick_rx) = mpsc::channel();
    let (resume_tx, resume_rx) = mpsc::channel::<()>();

    let runner = thread::spawn(move || {
        let mut seen = Vec::new();
        for update in stream {
            let running = update.status == Status::Running;
            seen.push(update);
            if running && seen.len() == 3 {
                // Pause between ticks 2 and 3 until the stop has been issued.
                tick_tx.send(()).unwrap();
                resume_rx.recv().unwrap();
            }
        }
        seen
    });

    tick_rx.recv().unwrap();
    let stopper = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || registry.stop("client-2"))
    };
    assert!(stopper.join().unwrap());
    resume_tx.send(()).unwrap();

    let seen = runner.join().unwrap();
    assert_eq!(seen.len(), 4, "three ticks then one stopped notification");
    let stopped = &seen[3];
    assert_eq!(stopped.status, Status::Stopped);
    assert_eq!(stopped.generation, seen[2].generation);
    assert_eq!(stopped.generation.as_ref().unwrap().id, 2);
    assert!((stopped.progress - 3.0).abs() < 1e-9);
    assert!(registry.is_empty());
}

#[test]
fn restarting_a_session_stops_the_previous_run() {
    let registry = Arc::new(SessionRegistry::new());
    let p = params().with_generations(Generations::Fixed(50));

    let mut first = ProgressStream::start(&registry, "tab", points(8), p.clone()).unwrap();
    assert_eq!(first.next().unwrap().status, Status::Running);

    let mut second = ProgressStream::start(&registry, "tab", points(8), p).unwrap();
    assert_eq!(first.next().unwrap().status, Status::Stopped);
    assert!(first.next().is_none());

    // The old run finishing must not unregister the new one.
    assert!(registry.is_active("tab"));
    assert_eq!(second.next().unwrap().status, Status::Running);
    drop(second);
    assert!(registry.is_empty());
}

#[test]
fn concurrent_sessions_do_not_interfere() {
    let registry = Arc::new(SessionRegistry::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let stream = ProgressStream::start(
                    &registry,
                    &format!("s{i}"),
                    points(7),
                    params()
                        .with_generations(Generations::Fixed(3))
                        .with_data_mode(DataMode::Best),
                )
                .unwrap();
                stream.last().unwrap()
            })
        })
        .collect();

    for handle in handles {
        let last = handle.join().unwrap();
        assert_eq!(last.status, Status::Completed);
        let generation = last.generation.unwrap();
        assert_eq!(generation.id, 2);
        assert!(generation.populations.iter().all(|p| p.routes.len() == 1));
    }
    assert!(registry.is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn progress_serializes_for_transport() {
    let registry = Arc::new(SessionRegistry::new());
    let mut stream = ProgressStream::start(
        &registry,
        "wire",
        points(5),
        params()
            .with_generations(Generations::Fixed(2))
            .with_data_mode(DataMode::Best),
    )
    .unwrap();

    let json = serde_json::to_value(stream.next().unwrap()).unwrap();
    assert_eq!(json["status"], "running");
    assert_eq!(json["progress"], 50.0);
    assert_eq!(json["generation"]["id"], 0);
    assert!(json["generation"]["overallBestRoute"]["path"].is_array());
    assert!(json.get("message").is_none());
}
