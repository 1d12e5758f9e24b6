//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use hashgrid::GridError;
    use hashgrid::io::error::{file_system_error, invalid_parameter};
    use std::error::Error;
    
    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system_error("/tmp/report.txt", "write report", io_error);

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("write report"));
        assert!(message.contains("/tmp/report.txt"));
        assert!(message.contains("file not found"));
    }

    // Tests only file system errors carry a source
    // Verified by returning a source for every variant
    #[test]
    fn test_errors_without_source() {
        assert!(GridError::InvalidCellSize { value: -1.0 }.source().is_none());
        assert!(invalid_parameter("span", &0, &"must be positive").source().is_none());
    }

    // Tests InvalidCellSize error formatting
    // Verified by omitting the value from the message
    #[test]
    fn test_invalid_cell_size_error() {
        let message = GridError::InvalidCellSize { value: -2.5 }.to_string();

        assert!(message.contains("-2.5"));
        assert!(message.contains("non-negative"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("span", &-1.0, &"must be finite and positive");

        let message = error.to_string();
        assert!(message.contains("span"));
        assert!(message.contains("-1"));
        assert!(message.contains("must be finite and positive"));
    }

    // Tests budget errors render ratios as percentages
    // Verified by printing raw ratios
    #[test]
    fn test_collision_budget_error() {
        let error = GridError::CollisionBudgetExceeded {
            workload: "random pairs",
            ratio: 0.003,
            budget: 0.0025,
        };

        let message = error.to_string();
        assert!(message.contains("random pairs"));
        assert!(message.contains("0.3000%"));
        assert!(message.contains("0.2500%"));
    }
}
