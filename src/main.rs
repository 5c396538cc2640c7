fn main() {
    profile_portal::run();
}
