//! Host-side helper: `cargo run` builds the WASM package into `static/pkg`,
//! serves `static/` locally and (if asked) exposes it via ngrok.

#[cfg(not(target_arch = "wasm32"))]
mod dev {
    use std::process::{Command, Stdio};
    use std::{thread, time::Duration};

    use anyhow::{bail, Context, Result};
    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(name = "dotscreen-dev", about = "Build and serve the dot screen page")]
    pub struct Args {
        /// Port for the local HTTP server
        #[arg(long, default_value_t = 8000)]
        pub port: u16,
        /// Serve whatever is already in static/pkg
        #[arg(long)]
        pub skip_build: bool,
        /// Start an ngrok tunnel to the server
        #[arg(long)]
        pub tunnel: bool,
    }

    fn build_pkg() -> Result<()> {
        println!("Building WASM pkg …");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => Ok(()),
            Ok(st) => bail!(
                "wasm-pack exited with {st}. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
            ),
            Err(_) => {
                eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
                Ok(())
            }
        }
    }

    pub fn run(args: Args) -> Result<()> {
        if !args.skip_build {
            build_pkg()?;
        }

        println!("Launching local server at http://127.0.0.1:{} …", args.port);
        let port = args.port.to_string();
        let _server = Command::new("python3")
            .args(["-m", "http.server", &port, "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to start http server")?;

        if args.tunnel {
            match Command::new("ngrok")
                .args(["http", &port])
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .spawn()
            {
                Ok(_) => println!("ngrok tunnel starting …"),
                Err(_) => eprintln!("ngrok not found. Install it to expose the site over the internet."),
            }
        }

        // Keep process alive
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    dev::run(dev::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
