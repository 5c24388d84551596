//! Minimal passive-mode FTP server for integration tests.
//!
//! Accepts any login, serves fixed files from the root directory over
//! EPSV/PASV data connections, and answers `550` for unknown files.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Starts a server in a background thread serving `files` (names without a
/// leading slash). Returns the base URL, e.g. "ftp://127.0.0.1:2121/".
pub fn start(files: Vec<(&str, Vec<u8>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        files
            .into_iter()
            .map(|(name, body)| (name.to_string(), body))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            thread::spawn(move || handle(stream, &files));
        }
    });
    format!("ftp://127.0.0.1:{}/", port)
}

fn reply(stream: &mut TcpStream, line: &str) -> std::io::Result<()> {
    stream.write_all(line.as_bytes())?;
    stream.write_all(b"\r\n")?;
    stream.flush()
}

fn handle(stream: TcpStream, files: &HashMap<String, Vec<u8>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut control = match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut reader = BufReader::new(stream);
    if reply(&mut control, "220 test ftp ready").is_err() {
        return;
    }

    let mut data_listener: Option<TcpListener> = None;
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let command = line.trim_end();
        let (verb, arg) = command.split_once(' ').unwrap_or((command, ""));
        let name = arg.trim_start_matches('/');

        let res = match verb.to_ascii_uppercase().as_str() {
            "USER" => reply(&mut control, "331 password please"),
            "PASS" => reply(&mut control, "230 logged in"),
            "PWD" => reply(&mut control, "257 \"/\" is the current directory"),
            "CWD" => reply(&mut control, "250 ok"),
            "TYPE" => reply(&mut control, "200 type set"),
            "REST" => reply(&mut control, "350 restarting"),
            "EPSV" | "PASV" => match TcpListener::bind("127.0.0.1:0") {
                Ok(l) => {
                    let port = l.local_addr().map(|a| a.port()).unwrap_or(0);
                    data_listener = Some(l);
                    if verb.eq_ignore_ascii_case("EPSV") {
                        reply(
                            &mut control,
                            &format!("229 Entering Extended Passive Mode (|||{}|)", port),
                        )
                    } else {
                        reply(
                            &mut control,
                            &format!(
                                "227 Entering Passive Mode (127,0,0,1,{},{})",
                                port >> 8,
                                port & 0xff
                            ),
                        )
                    }
                }
                Err(_) => reply(&mut control, "425 cannot open data connection"),
            },
            "SIZE" => match files.get(name) {
                Some(body) => reply(&mut control, &format!("213 {}", body.len())),
                None => reply(&mut control, "550 no such file"),
            },
            "RETR" => match (files.get(name), data_listener.take()) {
                (Some(body), Some(listener)) => {
                    let sent = reply(&mut control, "150 opening data connection")
                        .and_then(|()| listener.accept())
                        .and_then(|(mut data, _)| data.write_all(body));
                    match sent {
                        Ok(()) => reply(&mut control, "226 transfer complete"),
                        Err(_) => reply(&mut control, "426 transfer aborted"),
                    }
                }
                (None, _) => reply(&mut control, "550 no such file"),
                (Some(_), None) => reply(&mut control, "425 use PASV or EPSV first"),
            },
            "QUIT" => {
                let _ = reply(&mut control, "221 bye");
                return;
            }
            _ => reply(&mut control, "502 command not implemented"),
        };
        if res.is_err() {
            return;
        }
    }
}
