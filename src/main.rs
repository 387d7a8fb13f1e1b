use driftmesh::Backdrop;

fn main() {
    if let Err(e) = Backdrop::new().run() {
        eprintln!("Backdrop error: {}", e);
        std::process::exit(1);
    }
}
