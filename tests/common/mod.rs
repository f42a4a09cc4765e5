//! Shared on-disk fixture: a document root and a CGI root with shell scripts.
//!
//! Scripts are written once per test binary, before any test spawns a
//! process, so no forked child can still hold a script open for writing
//! when it is executed.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use cgilite::config::Config;

pub struct Fixture {
    pub dir: PathBuf,
    pub www: PathBuf,
    pub cgi: PathBuf,
}

impl Fixture {
    pub fn config(&self) -> Config {
        let mut cfg = Config::default();
        cfg.static_files.root = self.www.clone();
        cfg.cgi.root = self.cgi.clone();
        cfg.cgi.timeout_secs = 2;
        cfg.server.read_timeout_secs = 2;
        cfg
    }
}

pub fn fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(build)
}

fn build() -> Fixture {
    let dir = std::env::temp_dir().join(format!("cgilite-test-{}", std::process::id()));
    let www = dir.join("www");
    let cgi = dir.join("cgi-like");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(www.join("sub")).unwrap();
    fs::create_dir_all(&cgi).unwrap();

    fs::write(www.join("index.html"), "hi").unwrap();
    fs::write(www.join("empty.html"), "").unwrap();
    fs::write(www.join("other.html"), "<p>other page</p>").unwrap();
    fs::write(www.join("sub").join("page.txt"), "plain text").unwrap();
    fs::write(www.join("binary.bin"), [0u8, 1, 2, 255, 254]).unwrap();
    fs::write(dir.join("secret.txt"), "do not serve").unwrap();

    script(&cgi, "echo", "printf '%s' \"$1\"");
    script(&cgi, "argc", "printf '%s' \"$#\"");
    script(&cgi, "big", "i=0\nwhile [ $i -lt 300 ]; do printf 'abcdefghij'; i=$((i+1)); done");
    script(&cgi, "silent", "exit 0");
    script(&cgi, "fails", "printf 'partial'\nexit 3");
    script(&cgi, "sleepy", "sleep 10\nprintf 'late'");
    script(&cgi, "stderr", "echo oops >&2\nexit 1");

    let plain = cgi.join("notexec");
    fs::write(&plain, "#!/bin/sh\nprintf 'never'\n").unwrap();
    fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();

    fs::create_dir_all(cgi.join("subdir")).unwrap();

    // Passes the mode-bit check, but exec fails with EACCES because its
    // interpreter cannot be executed
    let interpreter = dir.join("not-an-interpreter");
    fs::write(&interpreter, "plain data\n").unwrap();
    fs::set_permissions(&interpreter, fs::Permissions::from_mode(0o644)).unwrap();
    let refused = cgi.join("refused");
    fs::write(&refused, format!("#!{}\nprintf 'never'\n", interpreter.display())).unwrap();
    fs::set_permissions(&refused, fs::Permissions::from_mode(0o755)).unwrap();

    Fixture { dir, www, cgi }
}

fn script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}
