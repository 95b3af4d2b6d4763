use super::*;

use std::os::unix::net::UnixStream;
use std::sync::mpsc;
use std::time::{Instant, UNIX_EPOCH};

use filemgr_fs::FileKind;
use filemgr_fs::testing::{FakeEntry, FakeFs, raw_stat};
use filemgr_protocol::codec::{MAX_FRAME_LEN, write_message};
use filemgr_protocol::{ReplyData, ReplyStatus};
use filemgr_runtime::PluginConfig;

fn exchange(agent: &Agent<FakeFs, PluginConfig>, request: AgentRequest) -> Reply {
    let (mut client, mut server) = UnixStream::pair().expect("socket pair");

    thread::scope(|s| {
        s.spawn(|| handle_client(&mut server, agent).expect("handle_client"));

        write_message(&mut client, &request).expect("write request");
        read_message(&mut client).expect("read reply")
    })
}

#[test]
fn serves_one_request_per_connection() {
    let fs = FakeFs::new()
        .with("/tmp/rspec", FakeEntry::dir())
        .with("/tmp/rspec/file.1", FakeEntry::file(0o100644, 1, "aa"));
    let agent = Agent::new(fs, PluginConfig::default());

    let reply = exchange(
        &agent,
        AgentRequest::List {
            dir: "/tmp/rspec".to_owned(),
            details: None,
        },
    );

    assert_eq!(reply.status, ReplyStatus::Ok);
    assert_eq!(
        reply.data,
        ReplyData::Files(vec!["/tmp/rspec/file.1".to_owned()])
    );
}

#[test]
fn failures_travel_as_aborted_replies() {
    let agent = Agent::new(FakeFs::new(), PluginConfig::default());

    let reply = exchange(
        &agent,
        AgentRequest::Remove {
            file: Some("/tmp/foo".to_owned()),
        },
    );

    assert_eq!(reply.status, ReplyStatus::Aborted);
    assert_eq!(
        reply.statusmsg,
        "Could not remove file '/tmp/foo' - it is not present"
    );
}

#[test]
fn garbage_request_is_an_error() {
    let agent = Agent::new(FakeFs::new(), PluginConfig::default());
    let (mut client, mut server) = UnixStream::pair().expect("socket pair");

    client.write_all(&[0, 0, 0, 2, 0xff, 0xff]).expect("write garbage");
    drop(client);

    assert!(handle_client(&mut server, &agent).is_err());
}

#[test]
fn pre_epoch_status_reaches_the_client() {
    let mut stat = raw_stat(FileKind::File, 0o100644, 3);
    stat.mtime = UNIX_EPOCH - Duration::from_secs(315_619_200);
    let entry = FakeEntry {
        stat: Some(stat),
        ..FakeEntry::file(0o100644, 3, "ab12")
    };
    let agent = Agent::new(FakeFs::new().with("/tmp/old", entry), PluginConfig::default());

    let reply = exchange(
        &agent,
        AgentRequest::Status {
            file: Some("/tmp/old".to_owned()),
        },
    );

    assert_eq!(reply.status, ReplyStatus::Ok);
    let ReplyData::Status(status) = reply.data else {
        panic!("expected a status reply, got {:?}", reply.data);
    };
    assert_eq!(status.mtime, UNIX_EPOCH - Duration::from_secs(315_619_200));
    assert_eq!(status.mtime_seconds, -315_619_200);
}

#[test]
fn unencodable_reply_becomes_an_aborted_reply() {
    let long = format!("/d/{}", "x".repeat(MAX_FRAME_LEN));
    let fs = FakeFs::new()
        .with("/d", FakeEntry::dir())
        .with(long, FakeEntry::file(0o100644, 0, "aa"));
    let agent = Agent::new(fs, PluginConfig::default());

    let reply = exchange(
        &agent,
        AgentRequest::List {
            dir: "/d".to_owned(),
            details: None,
        },
    );

    assert_eq!(reply.status, ReplyStatus::Aborted);
    assert!(
        reply.statusmsg.starts_with("Could not encode reply"),
        "{}",
        reply.statusmsg
    );
}

#[test]
fn sigterm_stops_an_idle_server() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let socket = tmp.path().join("agent.sock");
    let agent = Arc::new(Agent::new(FakeFs::new(), PluginConfig::default()));

    let (done_tx, done_rx) = mpsc::channel();
    let server_socket = socket.clone();
    thread::spawn(move || {
        let res = run_rpc_server(&server_socket, agent);
        let _ = done_tx.send(res.map_err(|e| e.to_string()));
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    while !socket.exists() {
        assert!(Instant::now() < deadline, "server never bound its socket");
        thread::sleep(Duration::from_millis(10));
    }

    signal_hook::low_level::raise(SIGTERM).expect("raise SIGTERM");

    let res = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("server still running after SIGTERM");
    assert_eq!(res, Ok(()));
    assert!(!socket.exists(), "socket left behind after shutdown");
}
