fn main() {
    logwatch_lib::run()
}
