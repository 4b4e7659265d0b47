fn main() {
    studydeck::app::run();
}
