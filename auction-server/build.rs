fn main() {
    // Migrations are embedded with `sqlx::migrate!`, so a new migration must trigger a rebuild.
    println!("cargo:rerun-if-changed=migrations");
}
