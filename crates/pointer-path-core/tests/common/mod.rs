use serde_json::{json, Value};

/// A single person with nested maps, arrays of maps, arrays of arrays and nulls
#[allow(dead_code)]
pub fn nested() -> Value {
    json!({
        "person": {
            "name": "John Doe",
            "firstName": "John",
            "lastName": "Doe",
            "age": 50,
            "human": true,
            "city": "Houston",
            "ssn": "123-45-6789",
            "measure": { "value": 100 },
            "measures": [ { "value": 1000 }, { "value": 2000 } ],
            "measured": [ 1000, 2000 ],
            "children": [ "Jane", "June", "Josh" ],
            "arrays": [
                [ "Jane1", "June1", "Josh1" ],
                [ "Jane2", "June2", "Josh2" ]
            ],
            "zero": { "zeroValue": 0 },
            "empty": null
        },
        "empty": "i lied"
    })
}

/// Two people wrapped in an array
#[allow(dead_code)]
pub fn people() -> Value {
    json!({
        "people": [
            {
                "person": {
                    "name": "John Doe",
                    "firstName": "John",
                    "lastName": "Doe",
                    "age": 50,
                    "female": false,
                    "city": "Houston",
                    "ssn": "123-45-6789"
                }
            },
            {
                "person": {
                    "name": "Jane Doe",
                    "firstName": "Jane",
                    "lastName": "Doe",
                    "age": 49,
                    "female": true,
                    "city": "Houston",
                    "ssn": "123-45-6789"
                }
            }
        ]
    })
}

/// A root array holding annotation records
#[allow(dead_code)]
pub fn nested_array() -> Value {
    json!([
        {
            "annotations": [
                { "name": "begin", "value": 1570476797161000_i64 },
                { "name": "end", "value": 1570476797161001_i64 }
            ]
        }
    ])
}

#[allow(dead_code)]
pub fn simple() -> Value {
    json!({ "existing": "value" })
}
