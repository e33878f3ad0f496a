//! Full client/server exchange over a loopback UDP socket.

use std::f64::consts::PI;
use std::net::{SocketAddr, UdpSocket};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use pada::{FloorPlan, LandmarkIndex, Localizer, OccupancyGrid};
use pada_server::ServerConfig;
use pada_server::protocol::{Channel, LocateReply, Reply, UpdateReply, split_message};
use pada_server::{Dispatcher, Server};
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    output: std::path::PathBuf,
    server_addr: SocketAddr,
    client: UdpSocket,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Harness {
    fn start() -> Self {
        let dir = TempDir::new().unwrap();
        let mask = dir.path().join("mask.txt");
        let row = vec!["0"; 100].join(" ");
        std::fs::write(&mask, vec![row; 100].join("\n")).unwrap();

        let landmarks = dir.path().join("landmarks.toml");
        std::fs::write(
            &landmarks,
            "[[landmarks]]\nname = \"stairs\"\nx = 80.0\ny = 80.0\nradius = 2.0\n",
        )
        .unwrap();

        let output = dir.path().join("out");
        let text = format!(
            r#"
            [network]
            bind_address = "127.0.0.1:0"
            read_timeout_ms = 20

            [output]
            trajectory_dir = {output:?}

            [floor_plan]
            obstacle_mask = {mask:?}
            landmarks = {landmarks:?}
            units = "cells"
            "#,
            output = output.to_string_lossy(),
            mask = mask.to_string_lossy(),
            landmarks = landmarks.to_string_lossy(),
        );
        let config = ServerConfig::from_toml(&text).unwrap();

        let plan = Arc::new(FloorPlan::load(&config.engine.floor_plan).unwrap());
        let localizer = Localizer::new(&config.engine, plan).unwrap();
        let mut server = Server::bind(&config, localizer).unwrap();
        let server_addr = server.local_addr().unwrap();

        let running = Arc::new(AtomicBool::new(true));
        let r = Arc::clone(&running);
        let handle = std::thread::spawn(move || server.run(r).unwrap());

        let client = UdpSocket::bind("127.0.0.1:0").unwrap();
        client
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();

        Self {
            _dir: dir,
            output,
            server_addr,
            client,
            running,
            handle: Some(handle),
        }
    }

    fn send(&self, datagrams: &[String]) {
        for d in datagrams {
            self.client.send_to(d.as_bytes(), self.server_addr).unwrap();
        }
    }

    fn request(&self, channel: Channel, payload: &str, chunk_chars: usize) -> Reply {
        let mut datagrams = split_message(channel, payload, chunk_chars);
        datagrams.reverse();
        self.send(&datagrams);

        let mut buf = [0u8; 4096];
        let (len, _) = self.client.recv_from(&mut buf).unwrap();
        serde_json::from_slice(&buf[..len]).unwrap()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// 200 samples: still, one 1 Hz swing of ±2 m/s², still.
fn one_step_csv() -> String {
    let mut csv = String::from("acc_x,acc_y,acc_z,gyro_x,gyro_y,gyro_z\n");
    for i in 0..200 {
        let z = if (50..150).contains(&i) {
            9.8 + 2.0 * (2.0 * PI * (i - 50) as f64 / 100.0).sin()
        } else {
            9.8
        };
        csv.push_str(&format!("0.0,0.0,{},0.0,0.0,0.0\n", z));
    }
    csv
}

#[test]
fn test_start_locate_end() {
    let h = Harness::start();

    assert_eq!(h.request(Channel::Start, "13,52,0", 64), Reply::Ack(true));

    let reply = h.request(Channel::Locate, &one_step_csv(), 512);
    let Reply::Locate(LocateReply {
        is_stepped,
        x,
        y,
        radian,
        landmark,
    }) = reply
    else {
        panic!("expected locate reply, got {:?}", reply);
    };
    assert!(is_stepped);
    // one ~0.69 m stride at 0.6 m per cell
    assert!(x > 14.0 && x < 14.3, "x = {}", x);
    assert!((y - 52.0).abs() < 1e-9);
    assert!(radian.abs() < 1e-9);
    assert_eq!(landmark, "none");

    assert_eq!(h.request(Channel::End, "", 64), Reply::Ack(true));

    let files: Vec<_> = std::fs::read_dir(&h.output)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("trajectory_") && name.ends_with(".csv"));

    let text = std::fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "x,y,orientation,landmark,WiFiCalibrated");
    assert_eq!(lines[1], "13,52,0,none,false");
    assert!(lines[2].ends_with(",none,false"));
}

#[test]
fn test_update_and_idle_locate() {
    let h = Harness::start();

    assert_eq!(h.request(Channel::Start, "x,y,heading\n78,78,1.0", 4), Reply::Ack(true));

    let reply = h.request(Channel::Update, "82,80,false", 64);
    assert_eq!(
        reply,
        Reply::Update(UpdateReply {
            x: 80.0,
            y: 79.0,
            radian: 1.0
        })
    );

    let still: String = std::iter::once("acc_x,acc_y,acc_z,gyro_x,gyro_y,gyro_z".to_string())
        .chain((0..150).map(|_| "0,0,9.8,0,0,0".to_string()))
        .collect::<Vec<_>>()
        .join("\n");
    let Reply::Locate(locate) = h.request(Channel::Locate, &still, 300) else {
        panic!("expected locate reply");
    };
    assert!(!locate.is_stepped);
    assert_eq!((locate.x, locate.y), (80.0, 79.0));
    assert_eq!(locate.landmark, "stairs");
}

#[test]
fn test_garbage_does_not_stop_server() {
    let h = Harness::start();
    h.send(&["not a fragment".to_string(), "1/1/warp/0,0".to_string()]);
    assert_eq!(h.request(Channel::Start, "1,1,0", 64), Reply::Ack(true));
    assert!(Path::new(&h.output).read_dir().is_err());
}

#[test]
fn test_builtin_defaults_walk_from_initial_pose() {
    let dir = TempDir::new().unwrap();
    let mut config = ServerConfig::default();
    config.output.trajectory_dir = dir.path().to_string_lossy().into_owned();
    let floor = &config.engine.floor_plan;
    let plan = FloorPlan::new(
        OccupancyGrid::empty(100, 100),
        LandmarkIndex::default(),
        floor.units,
        floor.flip_y,
        floor.meters_per_cell,
    )
    .unwrap();
    let localizer = Localizer::new(&config.engine, Arc::new(plan)).unwrap();
    let mut dispatcher = Dispatcher::new(&config, localizer);

    let client: SocketAddr = "127.0.0.1:45000".parse().unwrap();
    let now = Instant::now();
    let mut reply = None;
    for datagram in split_message(Channel::Locate, &one_step_csv(), 900) {
        reply = dispatcher.handle_datagram(datagram.as_bytes(), client, now);
    }
    let Reply::Locate(locate) = serde_json::from_slice(&reply.unwrap()).unwrap() else {
        panic!("expected locate reply");
    };
    assert!(locate.is_stepped);
    assert!(locate.x > 14.0 && locate.x < 14.3, "x = {}", locate.x);
    assert!((locate.y - 52.0).abs() < 1e-9);
}
