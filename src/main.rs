fn main() {
    zombie_whack::game::run();
}
