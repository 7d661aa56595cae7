/// Module containing the Ackley test function.
pub mod ackley;
pub use ackley::Ackley;

/// Module containing the Griewank test function.
pub mod griewank;
pub use griewank::Griewank;

/// Module containing the Rastrigin test function.
pub mod rastrigin;
pub use rastrigin::Rastrigin;

/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the Zakharov test function.
pub mod zakharov;
pub use zakharov::Zakharov;
